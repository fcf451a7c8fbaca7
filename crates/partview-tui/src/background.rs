//! Background requests against the backend.
//!
//! Each request runs as its own tokio task and reports back to the main
//! event loop through an unbounded mpsc channel. Failures are delivered as
//! events too; nothing here touches application state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use partview_core::event::{Command, Event};
use partview_core::remote::http::FileService;
use partview_core::selection::{DownloadRequest, PreviewTicket};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Runs [`Command`]s as background tasks and owns the in-flight preview.
pub struct Runner {
    service: Arc<dyn FileService>,
    tx: UnboundedSender<Event>,
    download_dir: PathBuf,
    preview_task: Option<JoinHandle<()>>,
}

impl Runner {
    pub fn new(
        service: Arc<dyn FileService>,
        tx: UnboundedSender<Event>,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            service,
            tx,
            download_dir,
            preview_task: None,
        }
    }

    pub fn run(&mut self, command: Command) {
        match command {
            Command::FetchDirectory => spawn_directory_fetch(self.service.clone(), self.tx.clone()),
            Command::FetchPreview(ticket) => {
                // A newer preview supersedes the running one.
                self.abort_preview();
                self.preview_task = Some(spawn_preview_fetch(
                    self.service.clone(),
                    ticket,
                    self.tx.clone(),
                ));
            }
            Command::Download(request) => spawn_download(
                self.service.clone(),
                request,
                self.download_dir.clone(),
                self.tx.clone(),
            ),
        }
    }

    pub fn abort_preview(&mut self) {
        if let Some(task) = self.preview_task.take() {
            task.abort();
        }
    }
}

/// Spawns the directory fetch.
pub fn spawn_directory_fetch(service: Arc<dyn FileService>, tx: UnboundedSender<Event>) {
    tokio::spawn(async move {
        let event = match service.fetch_directory().await {
            Ok(directory) => Event::DirectoryLoaded(directory),
            Err(e) => Event::DirectoryFailed {
                error: e.to_string(),
            },
        };
        let _ = tx.send(event);
    });
}

/// Spawns a preview fetch for `ticket`.
///
/// The returned handle lets the caller abort a request that a newer one
/// supersedes.
pub fn spawn_preview_fetch(
    service: Arc<dyn FileService>,
    ticket: PreviewTicket,
    tx: UnboundedSender<Event>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = service
            .fetch_preview(ticket.location())
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(Event::PreviewFinished { ticket, result });
    })
}

/// Spawns a download that saves the file into `directory`.
pub fn spawn_download(
    service: Arc<dyn FileService>,
    request: DownloadRequest,
    directory: PathBuf,
    tx: UnboundedSender<Event>,
) {
    tokio::spawn(async move {
        let event = match save(service.as_ref(), &request, &directory).await {
            Ok(path) => Event::DownloadSaved { path },
            Err(error) => Event::DownloadFailed {
                file_name: request.file_name,
                error,
            },
        };
        let _ = tx.send(event);
    });
}

async fn save(
    service: &dyn FileService,
    request: &DownloadRequest,
    directory: &Path,
) -> Result<PathBuf, String> {
    let target = download_target(directory, &request.file_name)
        .ok_or_else(|| format!("unusable file name {:?}", request.file_name))?;
    tracing::info!(url = %service.download_url(&request.location), "downloading");
    let bytes = service
        .download(&request.location)
        .await
        .map_err(|e| e.to_string())?;
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|e| e.to_string())?;
    tokio::fs::write(&target, bytes)
        .await
        .map_err(|e| e.to_string())?;
    Ok(target)
}

/// Where a download named `file_name` is written.
///
/// Only the final path component of the name is used, so a record name
/// cannot point outside `directory`. Returns `None` when nothing usable
/// remains.
pub fn download_target(directory: &Path, file_name: &str) -> Option<PathBuf> {
    let name = Path::new(file_name).file_name()?;
    Some(directory.join(name))
}
