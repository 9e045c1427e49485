use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the link listing. Also used when no `action` key is present.
    List,
    /// Hand `link` to the player.
    Play { link: String },
    /// Drop the cache and re-render the listing.
    Update,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("action requires a `{0}` parameter")]
    MissingParameter(&'static str),
    #[error("unknown action {0:?}")]
    UnknownAction(String),
}

impl Action {
    /// Parse a form-encoded query string, with or without a leading `?`.
    pub fn parse(query: &str) -> Result<Self, ActionError> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut action = None;
        let mut link = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "action" => action = Some(value.into_owned()),
                "link" => link = Some(value.into_owned()),
                _ => {}
            }
        }

        match action.as_deref() {
            None | Some("list") => Ok(Action::List),
            Some("play") => match link {
                Some(link) if !link.trim().is_empty() => Ok(Action::Play { link }),
                _ => Err(ActionError::MissingParameter("link")),
            },
            Some("update") => Ok(Action::Update),
            Some(other) => Err(ActionError::UnknownAction(other.to_string())),
        }
    }

    /// Query string that re-invokes the plugin with this action.
    pub fn to_query(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        match self {
            Action::List => {}
            Action::Play { link } => {
                query.append_pair("action", "play").append_pair("link", link);
            }
            Action::Update => {
                query.append_pair("action", "update");
            }
        }
        query.finish()
    }
}
