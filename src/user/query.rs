//! The `userId` query parameter that scopes most API requests.

use serde::Deserialize;

use crate::{Error, ObjectId};

/// A query string with a `userId` parameter, e.g. `?userId=507f1f77bcf86cd799439011`.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    /// The raw, unvalidated user ID.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl UserQuery {
    /// The validated user ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingUserId] when the parameter is absent or empty,
    /// or [Error::InvalidObjectId] when it is not shaped like an ObjectId.
    pub fn user_id(&self) -> Result<ObjectId, Error> {
        parse_user_id(self.user_id.as_deref())
    }
}

/// Validate a user ID supplied in a query string or request body.
pub(crate) fn parse_user_id(raw: Option<&str>) -> Result<ObjectId, Error> {
    match raw.map(str::trim) {
        None | Some("") => Err(Error::MissingUserId),
        Some(text) => ObjectId::parse(text),
    }
}

#[cfg(test)]
mod user_query_tests {
    use crate::{Error, ObjectId};

    use super::UserQuery;

    #[test]
    fn missing_user_id() {
        assert_eq!(UserQuery::default().user_id(), Err(Error::MissingUserId));
        assert_eq!(
            UserQuery {
                user_id: Some(String::new())
            }
            .user_id(),
            Err(Error::MissingUserId)
        );
    }

    #[test]
    fn malformed_user_id() {
        let query = UserQuery {
            user_id: Some("not-an-id".to_owned()),
        };

        assert_eq!(
            query.user_id(),
            Err(Error::InvalidObjectId("not-an-id".to_owned()))
        );
    }

    #[test]
    fn valid_user_id() {
        let id = ObjectId::generate();
        let query = UserQuery {
            user_id: Some(id.to_string()),
        };

        assert_eq!(query.user_id(), Ok(id));
    }
}
