//! Background worker: runs `AppCommand`s against the gateways
//!
//! Each command runs on its own tokio task so a slow request never holds up
//! the ones behind it. Responses may arrive out of order; the screens sort
//! that out by ticket.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{CatalogGateway, SportsGateway};
use crate::app::{AppCommand, AppMessage};
use crate::player::{LocalPlayer, PlayerType};

#[derive(Clone)]
pub struct Worker {
    catalog: Arc<dyn CatalogGateway>,
    sports: Arc<dyn SportsGateway>,
    player: PlayerType,
}

impl Worker {
    pub fn new(
        catalog: Arc<dyn CatalogGateway>,
        sports: Arc<dyn SportsGateway>,
        player: PlayerType,
    ) -> Self {
        Self {
            catalog,
            sports,
            player,
        }
    }

    /// Execute one command and produce its message
    pub async fn perform(&self, cmd: AppCommand) -> AppMessage {
        match cmd {
            AppCommand::Browse {
                ticket,
                query,
                page,
            } => AppMessage::BrowseLoaded {
                ticket,
                outcome: self.catalog.browse(&query, page).await,
            },
            AppCommand::LoadGenres { ticket } => AppMessage::GenresLoaded {
                ticket,
                outcome: self.catalog.genres().await,
            },
            AppCommand::ResolveTrailer { ticket, kind, id } => AppMessage::TrailerResolved {
                ticket,
                url: self.catalog.resolve_trailer(kind, id).await,
            },
            AppCommand::LoadHighlights { ticket } => AppMessage::HighlightsLoaded {
                ticket,
                outcome: self.sports.highlights().await,
            },
            AppCommand::Play { url } => {
                let player = LocalPlayer::new(self.player);
                match player.play(&url) {
                    Ok(mut child) => {
                        // Reap the process when it exits
                        tokio::spawn(async move {
                            let _ = child.wait().await;
                        });
                        AppMessage::PlayerStarted(self.player.display_name().to_string())
                    }
                    Err(e) => AppMessage::PlayerFailed(e.to_string()),
                }
            }
        }
    }

    /// Drain `commands` until the sender is dropped, sending results to `messages`
    pub fn spawn(
        self,
        mut commands: mpsc::UnboundedReceiver<AppCommand>,
        messages: mpsc::UnboundedSender<AppMessage>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(cmd) = commands.recv().await {
                tracing::debug!(?cmd, "Worker received command");
                let worker = self.clone();
                let messages = messages.clone();
                tokio::spawn(async move {
                    let msg = worker.perform(cmd).await;
                    if messages.send(msg).is_err() {
                        tracing::debug!("App gone, dropping worker result");
                    }
                });
            }
        })
    }
}
