mod notifier;
mod session;
mod ticker;

pub use notifier::{NotifierActor, NotifierHandle};
pub use session::{CommandReply, SessionActor, SessionHandle};
pub use ticker::IntervalScheduler;
