use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{config::AppConfig, templ_manager::TemplateManager, ProviderClient, Result};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let provider_config = config.provider_config;
        if provider_config.api_key.is_none() {
            warn!("No MAILERLITE_API_KEY defined, subscriptions will be rejected");
        }

        let tm = TemplateManager::init()?;
        let provider_timeout = provider_config.timeout();
        let provider_client = ProviderClient::new(
            &provider_config.url,
            provider_config.group_id,
            provider_config.api_key,
            provider_timeout,
        )?;

        let app_state = AppState::new(tm, provider_client);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}

pub struct InternalState {
    pub templ_mgr: TemplateManager,
    pub provider_client: ProviderClient,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(templ_mgr: TemplateManager, provider_client: ProviderClient) -> Self {
        AppState(Arc::new(InternalState {
            templ_mgr,
            provider_client,
        }))
    }
}
