pub mod dispatch;
pub mod edit;
pub mod init;
pub mod pages;
pub mod preview;
pub mod tree;

pub use dispatch::{dispatch, DispatchArgs};
pub use edit::{move_node, mutate, MoveArgs, MutateArgs};
pub use init::{init, InitArgs};
pub use pages::{pages, PagesArgs};
pub use preview::{preview, PreviewArgs};
pub use tree::{tree, TreeArgs};

use crate::config::Config;
use pagecraft_workspace::{Action, EditSession, EditorState, Site};

/// Open the configured site with `document` selected
pub(crate) fn open_session(cwd: &str, document: Option<&str>) -> anyhow::Result<(Config, EditSession)> {
    let config = Config::load(cwd)?;
    let site = config.load_site(cwd)?;
    let sources = config.load_sources(cwd)?;

    let mut session = EditSession::new(EditorState::new(site.documents, site.components), sources);
    session.dispatch(Action::SetDeviceWidth {
        width: config.device_width,
    });
    if let Some(document) = document {
        session.select_document(document)?;
    }
    Ok((config, session))
}

/// Write the session's documents back to the site file
pub(crate) fn save_session(config: &Config, cwd: &str, session: &EditSession) -> anyhow::Result<()> {
    let state = session.state();
    let site = Site {
        documents: state.documents.clone(),
        components: state.components.clone(),
    };
    site.save(&config.site_path(cwd))?;
    Ok(())
}
