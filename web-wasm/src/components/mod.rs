//! UIコンポーネント

pub mod header;
pub mod query_form;
pub mod result_panel;
