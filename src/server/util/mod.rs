pub mod html;
pub mod parse;
