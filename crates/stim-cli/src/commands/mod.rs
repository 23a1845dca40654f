pub mod annotate;
pub mod sublists;
