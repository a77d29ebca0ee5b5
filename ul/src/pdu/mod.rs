//! Protocol Data Unit items.
//!
//! Only the transfer syntax sub-item of presentation context negotiation
//! is supported here.
use dcmio_encoding::text::trim_uid;
use dcmio_transfer_syntax_registry::get_registry;
use snafu::{ensure, Backtrace, Snafu};
use std::fmt::{self, Display};

pub mod reader;
pub mod writer;

pub use reader::read_transfer_syntax_sub_item;
pub use writer::write_transfer_syntax_sub_item;

/// The item type of a transfer syntax sub-item.
pub const TRANSFER_SYNTAX_ITEM_TYPE: u8 = 0x40;

/// The size of the item header in bytes,
/// comprising the item type (1 byte),
/// reserved byte (1 byte),
/// and item length (2 bytes).
pub const ITEM_HEADER_SIZE: usize = 4;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Unknown transfer syntax `{}`", uid))]
    UnknownTransferSyntax { uid: String, backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A transfer syntax sub-item,
/// naming one transfer syntax proposed for or accepted in
/// a presentation context.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct TransferSyntaxSubItem {
    name: String,
}

impl TransferSyntaxSubItem {
    /// Create a sub-item with the given transfer syntax name,
    /// which is not checked against the registry.
    pub fn new(name: impl Into<String>) -> Self {
        TransferSyntaxSubItem { name: name.into() }
    }

    /// Create a sub-item for a registered transfer syntax.
    pub fn from_uid(uid: &str) -> Result<Self> {
        let mut item = TransferSyntaxSubItem::default();
        item.set_name_from_uid(uid)?;
        Ok(item)
    }

    /// The transfer syntax name, usually a UID.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the transfer syntax name,
    /// along with the item length.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the transfer syntax name with the given UID,
    /// if it is known to the transfer syntax registry.
    /// The name is left as it was otherwise.
    pub fn set_name_from_uid(&mut self, uid: &str) -> Result<()> {
        let uid = trim_uid(uid);
        ensure!(
            get_registry().contains(uid),
            UnknownTransferSyntaxSnafu { uid }
        );
        self.set_name(uid);
        Ok(())
    }

    /// The item length: the number of bytes of the name.
    pub fn length(&self) -> usize {
        self.name.len()
    }

    /// The full size of the item in bytes, header included.
    pub fn size(&self) -> usize {
        ITEM_HEADER_SIZE + self.length()
    }
}

impl Display for TransferSyntaxSubItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}", self.name)?;
        if let Some(ts) = get_registry().get(&self.name) {
            write!(f, " ({})", ts.name())?;
        }
        Ok(())
    }
}
