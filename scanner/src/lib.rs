//! Front-end for the QR attendance desk.
//!
//! Reads decoded QR text from a camera decoder process (or stdin), pulls the
//! member identifier out of the scan URL and submits it to the API.

pub mod camera;
pub mod client;
pub mod decode;
