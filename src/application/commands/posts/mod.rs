mod category;
mod create;
mod delete;
mod service;
mod update;

pub use category::CategoryChoice;
pub use create::CreatePostCommand;
pub use delete::DeletePostCommand;
pub use service::PostCommandService;
pub use update::UpdatePostCommand;
