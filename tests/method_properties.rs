//! Property tests over every method of both versions.

use amqp_wire::codec::{ShortString, WireReader};
use amqp_wire::method::{
    v0_8, v0_9_1, FieldKind, FieldTable, FieldValue, MethodBody, MethodTable, METHOD_PREFIX_SIZE,
};
use amqp_wire::WireError;
use bytes::Bytes;
use proptest::prelude::*;

fn field_value(kind: FieldKind) -> BoxedStrategy<FieldValue> {
    match kind {
        FieldKind::Octet => any::<u8>().prop_map(FieldValue::Octet).boxed(),
        FieldKind::Short => any::<u16>().prop_map(FieldValue::Short).boxed(),
        FieldKind::Long => any::<u32>().prop_map(FieldValue::Long).boxed(),
        FieldKind::LongLong => any::<u64>().prop_map(FieldValue::LongLong).boxed(),
        FieldKind::Timestamp => any::<u64>().prop_map(FieldValue::Timestamp).boxed(),
        FieldKind::ShortStr => prop_oneof![
            Just(String::new()),
            Just("x".repeat(255)),
            "[a-zA-Z0-9._-]{0,64}",
            "\\PC{0,20}",
        ]
        .prop_filter_map("fits a short string", |s| ShortString::new(s).ok())
        .prop_map(FieldValue::ShortStr)
        .boxed(),
        FieldKind::LongStr => proptest::collection::vec(any::<u8>(), 0..300)
            .prop_map(|v| FieldValue::LongStr(Bytes::from(v)))
            .boxed(),
        FieldKind::Table => proptest::collection::vec(any::<u8>(), 0..32)
            .prop_map(|v| FieldValue::Table(FieldTable::from_raw(Bytes::from(v))))
            .boxed(),
        FieldKind::Bit => any::<bool>().prop_map(FieldValue::Bit).boxed(),
    }
}

fn body<M: MethodTable>() -> impl Strategy<Value = MethodBody<M>> {
    proptest::sample::select(M::all()).prop_flat_map(|method| {
        let values: Vec<_> = method.spec().fields.iter().map(|f| field_value(f.kind)).collect();
        values.prop_map(move |values| MethodBody::new(method, values).unwrap())
    })
}

fn check_round_trip<M: MethodTable>(body: &MethodBody<M>) -> Result<(), TestCaseError> {
    let payload = body.encode_payload();
    prop_assert_eq!(body.body_size(), payload.len() - METHOD_PREFIX_SIZE);
    let decoded = M::registry().decode_payload(payload).unwrap();
    prop_assert_eq!(&decoded, body);
    Ok(())
}

/// A frame cut short while still declaring the full body size is a
/// truncation at every cut, and the reader is left where it started.
fn check_truncation<M: MethodTable>(body: &MethodBody<M>) -> Result<(), TestCaseError> {
    let payload = body.encode_payload();
    let fields = payload.slice(METHOD_PREFIX_SIZE..);
    let declared = fields.len();
    for cut in 0..declared {
        let mut reader = WireReader::with_declared_size(fields.slice(..cut), declared);
        let err = M::registry()
            .decode(body.class_id(), body.method_id(), &mut reader, declared)
            .unwrap_err();
        prop_assert!(
            matches!(err, WireError::TruncatedInput { .. }),
            "{} cut at {}: {}",
            body.name(),
            cut,
            err
        );
        prop_assert_eq!(reader.position(), 0);
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_round_trip_v0_8(body in body::<v0_8::Method>()) {
        check_round_trip(&body)?;
    }

    #[test]
    fn test_round_trip_v0_9_1(body in body::<v0_9_1::Method>()) {
        check_round_trip(&body)?;
    }

    #[test]
    fn test_truncation_v0_8(body in body::<v0_8::Method>()) {
        check_truncation(&body)?;
    }

    #[test]
    fn test_truncation_v0_9_1(body in body::<v0_9_1::Method>()) {
        check_truncation(&body)?;
    }

    #[test]
    fn test_trailing_bytes_rejected(body in body::<v0_9_1::Method>(), extra in 1usize..8) {
        let mut payload = body.encode_payload().to_vec();
        payload.extend(std::iter::repeat(0u8).take(extra));
        let err = v0_9_1::Method::registry().decode_payload(Bytes::from(payload)).unwrap_err();
        prop_assert!(matches!(err, WireError::MalformedFrame(_)), "{}", err);
    }
}

#[test]
fn test_default_bodies_size_matches_payload() {
    for &method in v0_8::Method::ALL {
        let body = MethodBody::with_defaults(method);
        let mut out = bytes::BytesMut::new();
        body.write_payload(&mut out);
        assert_eq!(body.body_size(), out.len(), "{}", body.name());
        assert_eq!(body.encode_payload().len(), METHOD_PREFIX_SIZE + out.len());
    }
    for &method in v0_9_1::Method::ALL {
        let body = MethodBody::with_defaults(method);
        let mut out = bytes::BytesMut::new();
        body.write_payload(&mut out);
        assert_eq!(body.body_size(), out.len(), "{}", body.name());
        assert_eq!(body.encode_payload().len(), METHOD_PREFIX_SIZE + out.len());
    }
}

#[test]
fn test_bit_groups_all_set_and_clear() {
    for value in [true, false] {
        let body = MethodBody::builder(v0_9_1::Method::QueueDeclare)
            .set_str("queue", "q")
            .set("passive", value)
            .set("durable", value)
            .set("exclusive", value)
            .set("auto_delete", value)
            .set("no_wait", value)
            .build()
            .unwrap();
        let payload = body.encode_payload();
        // reserved_1(2) + "q"(2) then the bit octet
        assert_eq!(payload[8], if value { 0b1_1111 } else { 0 });
        assert_eq!(v0_9_1::Method::registry().decode_payload(payload).unwrap(), body);
    }
}
