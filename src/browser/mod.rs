pub mod connection;
pub mod headless;

pub use connection::connect_to_browser_and_page;
pub use headless::launch_browser;

use chromiumoxide::{Browser, Page};

use crate::config::Config;
use crate::error::AppResult;

/// 按配置打开浏览器会话：有调试端口就连接，否则启动新浏览器
pub async fn open_session(config: &Config) -> AppResult<(Browser, Page)> {
    match config.browser_debug_port {
        Some(port) => connect_to_browser_and_page(port, &config.target_url).await,
        None => {
            launch_browser(
                &config.target_url,
                config.headless,
                config.chrome_executable.as_deref(),
            )
            .await
        }
    }
}
