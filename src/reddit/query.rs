use crate::types::{SortingOption, TimeFilterOption};

use super::{Posts, Subreddit};

/// A listing request bound to a subreddit, ready to be run with a limit.
pub struct Query<'s, S> {
    subreddit: &'s S,
    sorting: SortingOption,
    time_filter: TimeFilterOption,
}

/// Picks the listing for `sorting`. Only controversial and top carry the
/// time filter; the other rankings ignore it.
pub fn select_query_function<S: Subreddit>(
    subreddit: &S,
    time_filter: TimeFilterOption,
    sorting: SortingOption,
) -> Query<'_, S> {
    Query {
        subreddit,
        sorting,
        time_filter,
    }
}

impl<S: Subreddit> Query<'_, S> {
    // SortingOption is closed, so every parsed option has a listing here.
    pub async fn fetch(&self, limit: u32) -> Posts {
        let subreddit = self.subreddit;
        match self.sorting {
            SortingOption::Controversial => subreddit.controversial(self.time_filter, limit).await,
            SortingOption::Gilded => subreddit.gilded(limit).await,
            SortingOption::Hot => subreddit.hot(limit).await,
            SortingOption::New => subreddit.new(limit).await,
            SortingOption::RandomRising => subreddit.random_rising(limit).await,
            SortingOption::Rising => subreddit.rising(limit).await,
            SortingOption::Top => subreddit.top(self.time_filter, limit).await,
        }
    }
}
