//! 命令定义和实现

pub mod r#move;
pub mod request;

pub use r#move::MoveCommand;
pub use request::RequestCommand;
