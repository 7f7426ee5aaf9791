pub mod codec;
pub mod delta;
pub mod simple9;
pub mod vbyte;
