// src/gui/components/mod.rs
pub mod data_table;
pub mod keyword_panel;
pub mod tabs;
pub mod toolbar;
