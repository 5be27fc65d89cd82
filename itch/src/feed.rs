//! Feed descriptors tying a message catalog to a column table.

use crate::codec::FieldDef;

/// A static description of one ITCH feed flavor.
///
/// `fields` is the full union of message columns in output-schema order
/// (alphabetical by name). `catalog` maps a one-byte message type to the
/// wire-ordered list of indices into `fields`; an unknown type returns
/// `None` and the message is skipped.
pub struct Feed {
    /// Feed name used in logs.
    pub name: &'static str,
    /// Union of message-field columns, in output-schema order.
    pub fields: &'static [FieldDef],
    /// Message-type dispatch table.
    pub catalog: fn(u8) -> Option<&'static [usize]>,
}

impl Feed {
    /// Looks up the wire layout for `message_type`.
    pub fn layout(&self, message_type: u8) -> Option<&'static [usize]> {
        (self.catalog)(message_type)
    }

    /// Total wire length of a message with this layout, including the
    /// one-byte type tag.
    pub fn message_len(&self, layout: &[usize]) -> usize {
        1 + layout
            .iter()
            .map(|&column| self.fields[column].codec.width())
            .sum::<usize>()
    }
}
