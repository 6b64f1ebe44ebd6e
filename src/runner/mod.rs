pub mod ds;
pub mod plugin;
pub mod std_lib;
