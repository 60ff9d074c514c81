//! Page navigation: the transition controller and its render-facing view
//! state.

pub mod controller;
