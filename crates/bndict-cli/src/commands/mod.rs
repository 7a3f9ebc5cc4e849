pub mod build_ops;
pub mod config_ops;
pub mod dict_ops;
