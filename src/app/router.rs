use crate::app::action::{Action, ActionError};
use crate::config::Config;
use crate::engine::pipeline::LinkProvider;
use crate::net::fetch::LinkSource;
use crate::ui::{ListEntry, Player, Presenter, Severity};

/// Maps one host invocation to provider calls and host output.
pub struct Router<S: LinkSource> {
    provider: LinkProvider<S>,
    base_url: String,
    plugin_url: String,
}

impl<S: LinkSource> Router<S> {
    pub fn new(config: &Config, provider: LinkProvider<S>) -> Self {
        Self {
            provider,
            base_url: config.base_url.clone(),
            plugin_url: config.plugin_url.clone(),
        }
    }

    pub fn provider(&self) -> &LinkProvider<S> {
        &self.provider
    }

    /// Parse `query` and run the resulting action.
    ///
    /// A malformed query is returned as an error before anything is
    /// fetched or rendered.
    pub fn dispatch<H: Presenter + Player>(
        &self,
        query: &str,
        host: &mut H,
    ) -> Result<(), ActionError> {
        let action = Action::parse(query)?;
        self.run(&action, host);
        Ok(())
    }

    pub fn run<H: Presenter + Player>(&self, action: &Action, host: &mut H) {
        match action {
            Action::List => self.list(host),
            Action::Play { link } => self.play(link, host),
            Action::Update => self.provider.force_refresh(host),
        }
    }

    fn list(&self, presenter: &mut dyn Presenter) {
        let links = self.provider.get_links(&self.base_url, presenter);
        if links.is_empty() {
            presenter.notify("Error", "No AceStream links found", Severity::Error);
            return;
        }

        for (idx, link) in links.iter().enumerate() {
            let n = idx + 1;
            let play = Action::Play { link: link.clone() };
            presenter.add_entry(&ListEntry {
                label: format!("AceStream link {}", n),
                title: format!("Stream {}", n),
                playable: true,
                target: format!("{}?{}", self.plugin_url, play.to_query()),
            });
        }
        presenter.end_of_listing();
    }

    fn play(&self, link: &str, player: &mut dyn Player) {
        log::info!("Playing AceStream link: {}", link);
        player.resolve(link, true);
    }
}
