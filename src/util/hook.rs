use tracing::error;

use crate::ui::tui;

/// Restore the terminal before the default handler prints, and keep a copy
/// of the panic in the log file since stderr is lost with the screen.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::Tui::restore();
        error!("panic: {panic_info}");
        hook(panic_info);
    }));
}
