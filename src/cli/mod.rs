pub mod cli_adapter;
pub mod controller_factory;
