use std::path::PathBuf;

use crate::{Res, reddit::Reddit, utils};

use super::RedditCli;

impl<R: Reddit> RedditCli<R> {
    /// Absolute path of the config file in use.
    ///
    /// The path is reported even when the credentials came from the
    /// environment and the file does not exist.
    pub fn config_location(&self) -> Res<PathBuf> {
        utils::absolute_path(&self.config_path)
    }
}
