//! One module per supported console format. Each exposes `compress` and
//! `compress_moduled`, both returning [`crate::error::CompressResult`], and
//! privately implements [`crate::engine::Backend`] to drive the shared
//! optimal parser.

pub mod chameleon;
pub mod comper;
pub mod faxman;
pub mod kosinski;
pub mod kosinski_plus;
pub mod rage;
pub mod rocket;
pub mod saxman;
