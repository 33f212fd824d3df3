pub mod central_panel;
pub mod tools_panel;
