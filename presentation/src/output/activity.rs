//! Console observer for platform activity

use crate::output::console::ConsoleFormatter;
use std::sync::{OnceLock, Weak};
use tribunal_application::{ActivityObserver, MemberDirectory, PlatformActivity};

/// Prints every platform action as it happens
///
/// The directory is attached after the platform is built, since the
/// platform is usually the directory itself.
#[derive(Default)]
pub struct ConsoleActivityPrinter {
    directory: OnceLock<Weak<dyn MemberDirectory>>,
}

impl ConsoleActivityPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve names through `directory`; only the first call takes effect
    pub fn attach(&self, directory: Weak<dyn MemberDirectory>) {
        let _ = self.directory.set(directory);
    }
}

impl ActivityObserver for ConsoleActivityPrinter {
    fn on_activity(&self, activity: &PlatformActivity) {
        let Some(directory) = self.directory.get().and_then(Weak::upgrade) else {
            println!("{:?}", activity);
            return;
        };
        println!();
        println!("{}", ConsoleFormatter::format_activity(activity, directory.as_ref()));
    }
}
