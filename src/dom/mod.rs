pub mod parser;

/// An opaque stream URI, selected only by containing the stream scheme.
pub type Link = String;

/// Links in document order of discovery. Duplicates are kept.
pub type LinkList = Vec<Link>;
