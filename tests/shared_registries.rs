//! Registries shared across threads.

use std::sync::Arc;

use amqp_wire::amqp1::security::{SaslInit, SaslMechanisms};
use amqp_wire::amqp1::{encoder, DescribedObject, DescribedType, DescriptorRegistry, Symbol};
use amqp_wire::codec::WireReader;
use amqp_wire::method::{v0_8, v0_9_1, MethodBody, MethodTable};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_descriptor_registry_shared_by_clone() {
    let registry = DescriptorRegistry::standard().unwrap();

    let mut tasks = Vec::new();
    for i in 0..16u32 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move {
            let init = SaslInit {
                mechanism: Some(Symbol::new("PLAIN")),
                hostname: Some(format!("host-{}", i)),
                ..SaslInit::default()
            };
            let bytes = encoder::encode(&init.to_value()).unwrap();
            for _ in 0..100 {
                let mut reader = WireReader::new(bytes.clone());
                let object = registry.decode(&mut reader).unwrap();
                assert_eq!(object, DescribedObject::SaslInit(init.clone()));
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_method_registries_first_use_from_many_threads() {
    let mut tasks = Vec::new();
    for i in 0..8u64 {
        tasks.push(tokio::spawn(async move {
            let ack = MethodBody::builder(v0_9_1::Method::BasicAck)
                .set("delivery_tag", i)
                .build()
                .unwrap();
            let decoded = v0_9_1::Method::registry()
                .decode_payload(ack.encode_payload())
                .unwrap();
            assert_eq!(decoded, ack);

            let publish = MethodBody::with_defaults(v0_8::Method::FilePublish);
            let decoded = v0_8::Method::registry()
                .decode_payload(publish.encode_payload())
                .unwrap();
            assert_eq!(decoded, publish);
            v0_9_1::Method::registry() as *const _ as usize
        }));
    }

    let mut addresses = Vec::new();
    for task in tasks {
        addresses.push(task.await.unwrap());
    }
    addresses.dedup();
    assert_eq!(addresses.len(), 1);
}

#[tokio::test]
async fn test_registry_in_arc_across_blocking_tasks() {
    let registry = Arc::new(DescriptorRegistry::standard().unwrap());
    let mechanisms = SaslMechanisms {
        sasl_server_mechanisms: Some(vec![Symbol::new("ANONYMOUS"), Symbol::new("PLAIN")]),
    };
    let bytes = encoder::encode(&mechanisms.to_value()).unwrap();

    let handle = {
        let registry = Arc::clone(&registry);
        let bytes = bytes.clone();
        tokio::task::spawn_blocking(move || registry.decode(&mut WireReader::new(bytes)))
    };

    let decoded = handle.await.unwrap().unwrap();
    assert_eq!(decoded, DescribedObject::SaslMechanisms(mechanisms));
}
