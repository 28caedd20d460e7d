//! Field-schema tables describing each method's wire layout.

use std::fmt::Debug;
use std::hash::Hash;

use super::registry::MethodRegistry;
use crate::protocol::ProtocolVersion;

/// Wire type of a single method field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Unsigned 8-bit integer.
    Octet,
    /// Unsigned 16-bit integer.
    Short,
    /// Unsigned 32-bit integer.
    Long,
    /// Unsigned 64-bit integer.
    LongLong,
    /// 64-bit POSIX timestamp.
    Timestamp,
    /// `[len:u8][utf-8]`.
    ShortStr,
    /// `[len:u32][bytes]`.
    LongStr,
    /// `[len:u32][encoded table]`, carried opaque.
    Table,
    /// One flag inside a packed-boolean group.
    Bit,
}

impl FieldKind {
    /// Human-readable kind name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Octet => "octet",
            FieldKind::Short => "short",
            FieldKind::Long => "long",
            FieldKind::LongLong => "longlong",
            FieldKind::Timestamp => "timestamp",
            FieldKind::ShortStr => "shortstr",
            FieldKind::LongStr => "longstr",
            FieldKind::Table => "table",
            FieldKind::Bit => "bit",
        }
    }
}

/// One declared field of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name in snake_case, e.g. `routing_key`.
    pub name: &'static str,
    /// Wire type.
    pub kind: FieldKind,
}

/// Static description of one (class, method) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    /// Dotted name, e.g. `file.publish`.
    pub name: &'static str,
    /// Protocol-assigned class identifier.
    pub class_id: u16,
    /// Protocol-assigned method identifier within the class.
    pub method_id: u16,
    /// Fields in declaration (= wire) order.
    pub fields: &'static [FieldSpec],
}

impl MethodSpec {
    /// Position of a field by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Number of bytes the fixed-width part of the body occupies
    /// (integers plus packed-bit octets), ignoring strings and tables.
    pub fn fixed_size(&self) -> usize {
        let mut size = 0;
        let mut bits_in_group = 0usize;
        for field in self.fields {
            if field.kind == FieldKind::Bit {
                if bits_in_group % 8 == 0 {
                    size += 1;
                }
                bits_in_group += 1;
                continue;
            }
            bits_in_group = 0;
            size += match field.kind {
                FieldKind::Octet => 1,
                FieldKind::Short => 2,
                FieldKind::Long => 4,
                FieldKind::LongLong | FieldKind::Timestamp => 8,
                FieldKind::ShortStr | FieldKind::LongStr | FieldKind::Table => 0,
                FieldKind::Bit => unreachable!(),
            };
        }
        size
    }
}

/// A protocol version's method table.
///
/// Implemented by the `Method` enum each version module generates with
/// `amqp_methods!`. Every version owns a disjoint table and registry, so
/// adding a version never touches another.
pub trait MethodTable: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Version this table belongs to.
    const VERSION: ProtocolVersion;

    /// Every method of the version, in declaration order.
    fn all() -> &'static [Self];

    /// Static schema of this method.
    fn spec(self) -> &'static MethodSpec;

    /// Process-wide `(class_id, method_id)` lookup, built on first use.
    fn registry() -> &'static MethodRegistry<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLISH_FIELDS: &[FieldSpec] = &[
        FieldSpec {
            name: "ticket",
            kind: FieldKind::Short,
        },
        FieldSpec {
            name: "exchange",
            kind: FieldKind::ShortStr,
        },
        FieldSpec {
            name: "mandatory",
            kind: FieldKind::Bit,
        },
        FieldSpec {
            name: "immediate",
            kind: FieldKind::Bit,
        },
    ];

    const PUBLISH: MethodSpec = MethodSpec {
        name: "basic.publish",
        class_id: 60,
        method_id: 40,
        fields: PUBLISH_FIELDS,
    };

    #[test]
    fn test_field_index() {
        assert_eq!(PUBLISH.field_index("ticket"), Some(0));
        assert_eq!(PUBLISH.field_index("immediate"), Some(3));
        assert_eq!(PUBLISH.field_index("nowait"), None);
    }

    #[test]
    fn test_fixed_size_counts_one_octet_per_bit_group() {
        // ticket (2) + one bit octet (1)
        assert_eq!(PUBLISH.fixed_size(), 3);
    }

    #[test]
    fn test_fixed_size_nine_bits_take_two_octets() {
        const NINE: &[FieldSpec] = &[FieldSpec {
            name: "flag",
            kind: FieldKind::Bit,
        }; 9];
        let spec = MethodSpec {
            name: "test.bits",
            class_id: 1,
            method_id: 1,
            fields: NINE,
        };
        assert_eq!(spec.fixed_size(), 2);
    }

    #[test]
    fn test_separate_bit_groups_take_separate_octets() {
        const SPLIT: &[FieldSpec] = &[
            FieldSpec {
                name: "a",
                kind: FieldKind::Bit,
            },
            FieldSpec {
                name: "n",
                kind: FieldKind::Octet,
            },
            FieldSpec {
                name: "b",
                kind: FieldKind::Bit,
            },
        ];
        let spec = MethodSpec {
            name: "test.split",
            class_id: 1,
            method_id: 2,
            fields: SPLIT,
        };
        assert_eq!(spec.fixed_size(), 3);
    }
}
