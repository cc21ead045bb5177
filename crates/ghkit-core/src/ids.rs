//! Strongly-typed numeric ids for GitHub resources.
//!
//! GitHub identifies most resources by a 64-bit integer. Wrapping each kind
//! in its own type keeps a repository id from being passed where an issue id
//! is expected; on the wire they stay plain JSON numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::query::QueryValue;

/// Macro to generate strongly-typed id wrapper types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|err| {
                        Error::InvalidRequest(format!(
                            "invalid {}: `{s}`: {err}",
                            stringify!($name)
                        ))
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl QueryValue for $name {
            fn query_value(&self) -> String {
                self.0.to_string()
            }

            fn is_zero(&self) -> bool {
                self.0 == 0
            }
        }
    };
}

id_type!(UserId, "User or bot account id");
id_type!(OrganizationId, "Organization id");
id_type!(RepositoryId, "Repository id");
id_type!(IssueId, "Issue id (not the per-repository issue number)");
id_type!(CommentId, "Issue comment id");
id_type!(LabelId, "Label id");
id_type!(MilestoneId, "Milestone id");
