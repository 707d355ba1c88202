//! UI module - painter helpers and small widgets shared by the views

pub mod components;
