pub mod commands;
pub mod dict_source;
pub mod pipeline;
pub mod trace_init;
