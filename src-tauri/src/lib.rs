// Configuration (retrodesk.toml + environment)
mod config;

// Desktop shell: icons, selection, program launching
mod desktop;

// Menu bar clock
mod menu_bar;

// Program registry and window content views
mod programs;

// Window manager state
mod state;

// Crypto wallet connector
mod wallet;

// Pointer handling for window frames
mod window_view;

use config::DesktopConfig;
use desktop::{DesktopShell, DesktopSnapshot, DesktopWindow};
use menu_bar::MenuBarView;
use programs::{ContentView, ProgramDescriptor, ProgramId, PROGRAMS};
use serde::Serialize;
use state::window::WindowOverrides;
use std::sync::Mutex;
use tauri::{AppHandle, Emitter, Manager, State};
use tauri_plugin_opener::OpenerExt;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use wallet::{JsonRpcProvider, WalletConnection, WalletView};
use window_view::{HitRegion, Point, ViewEffect, Viewport, WindowControl};

// Event payload types for frontend communication
#[derive(Clone, Serialize)]
struct SelectionChangedPayload {
    icon_id: Option<String>,
}

#[derive(Clone, Serialize)]
struct ClockTickPayload {
    time: String,
}

// Wallet endpoint, if one is configured. None means "no wallet available".
struct WalletBackend(Option<JsonRpcProvider>);

// ===== Event helpers =====

fn emit_window(app: &AppHandle, event: &str, window: &DesktopWindow) -> Result<(), String> {
    app.emit(event, window.clone()).map_err(|e| e.to_string())
}

/// Broadcast whatever a window frame gesture changed
fn emit_effect(app: &AppHandle, shell: &DesktopShell, effect: &ViewEffect) -> Result<(), String> {
    match effect {
        ViewEffect::Unchanged => Ok(()),
        ViewEffect::Updated(id) => match shell.windows().get(id) {
            Some(window) => emit_window(app, "window-updated", window),
            None => Ok(()),
        },
        ViewEffect::Closed(id) => app.emit("window-closed", id.clone()).map_err(|e| e.to_string()),
    }
}

fn emit_selection(app: &AppHandle, shell: &DesktopShell) -> Result<(), String> {
    app.emit(
        "selection-changed",
        SelectionChangedPayload {
            icon_id: shell.selected_icon().map(str::to_string),
        },
    )
    .map_err(|e| e.to_string())
}

fn emit_wallet(app: &AppHandle, view: &WalletView) -> Result<(), String> {
    app.emit("wallet-changed", view.clone()).map_err(|e| e.to_string())
}

/// Announce a new window. A wallet window also looks for an account the user
/// already authorized.
fn window_opened(app: &AppHandle, window: &DesktopWindow) -> Result<(), String> {
    emit_window(app, "window-opened", window)?;

    if window.content == ContentView::Wallet {
        let wants_check = {
            let state = app.state::<Mutex<WalletConnection>>();
            let wallet = state.lock().map_err(|e| e.to_string())?;
            wallet.wants_check()
        };
        if wants_check {
            let app = app.clone();
            tauri::async_runtime::spawn(async move {
                if let Err(e) = check_wallet(&app).await {
                    warn!(error = %e, "wallet check on open failed");
                }
            });
        }
    }
    Ok(())
}

// ===== Window Management Commands =====

/// Launch a registered program with its default content and size
#[tauri::command]
fn open_program(
    program_id: String,
    app: AppHandle,
    state: State<Mutex<DesktopShell>>,
) -> Result<DesktopWindow, String> {
    let program = ProgramId::from_str(&program_id)
        .ok_or_else(|| format!("Unknown program: {}", program_id))?;

    let mut shell = state.lock().map_err(|e| e.to_string())?;
    let window = shell.launch(program).clone();

    window_opened(&app, &window)?;
    Ok(window)
}

/// Open a window with an explicit title and optional geometry
#[tauri::command]
fn open_window(
    program_id: String,
    title: String,
    overrides: Option<WindowOverrides>,
    app: AppHandle,
    state: State<Mutex<DesktopShell>>,
) -> Result<DesktopWindow, String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    let window = shell.open_window(&program_id, title, overrides).clone();

    window_opened(&app, &window)?;
    Ok(window)
}

#[tauri::command]
fn close_window(id: String, app: AppHandle, state: State<Mutex<DesktopShell>>) -> Result<(), String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;

    if shell.windows_mut().close(&id).is_some() {
        app.emit("window-closed", id).map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[tauri::command]
fn focus_window(
    id: String,
    app: AppHandle,
    state: State<Mutex<DesktopShell>>,
) -> Result<Option<DesktopWindow>, String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    let window = shell.windows_mut().focus(&id).cloned();

    if let Some(window) = &window {
        emit_window(&app, "window-updated", window)?;
    }
    Ok(window)
}

/// Place a window exactly where asked. Callers clamp to the viewport first.
#[tauri::command]
fn move_window(
    id: String,
    x: f64,
    y: f64,
    app: AppHandle,
    state: State<Mutex<DesktopShell>>,
) -> Result<Option<DesktopWindow>, String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    let window = shell.windows_mut().move_to(&id, x, y).cloned();

    if let Some(window) = &window {
        emit_window(&app, "window-updated", window)?;
    }
    Ok(window)
}

#[tauri::command]
fn minimize_window(
    id: String,
    app: AppHandle,
    state: State<Mutex<DesktopShell>>,
) -> Result<Option<DesktopWindow>, String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    let window = shell.windows_mut().minimize(&id).cloned();

    if let Some(window) = &window {
        emit_window(&app, "window-updated", window)?;
    }
    Ok(window)
}

#[tauri::command]
fn restore_window(
    id: String,
    app: AppHandle,
    state: State<Mutex<DesktopShell>>,
) -> Result<Option<DesktopWindow>, String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    let window = shell.windows_mut().restore(&id).cloned();

    if let Some(window) = &window {
        emit_window(&app, "window-updated", window)?;
    }
    Ok(window)
}

/// Visible windows, bottom-most first
#[tauri::command]
fn list_windows(state: State<Mutex<DesktopShell>>) -> Result<Vec<DesktopWindow>, String> {
    let shell = state.lock().map_err(|e| e.to_string())?;
    Ok(shell.windows().render_order().into_iter().cloned().collect())
}

#[tauri::command]
fn list_minimized(state: State<Mutex<DesktopShell>>) -> Result<Vec<DesktopWindow>, String> {
    let shell = state.lock().map_err(|e| e.to_string())?;
    Ok(shell.windows().minimized().into_iter().cloned().collect())
}

// ===== Window Frame Commands =====

/// Pointer pressed on a window: "title", "body", "minimize" or "close"
#[tauri::command]
fn window_pointer_down(
    id: String,
    region: String,
    x: f64,
    y: f64,
    app: AppHandle,
    state: State<Mutex<DesktopShell>>,
) -> Result<(), String> {
    let region =
        HitRegion::from_str(&region).ok_or_else(|| format!("Invalid window region: {}", region))?;

    let mut shell = state.lock().map_err(|e| e.to_string())?;
    let effect = shell.window_pointer_down(&id, region, Point { x, y });
    emit_effect(&app, &shell, &effect)
}

#[tauri::command]
fn window_pointer_move(
    x: f64,
    y: f64,
    app: AppHandle,
    state: State<Mutex<DesktopShell>>,
) -> Result<(), String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    let effect = shell.window_pointer_move(Point { x, y });
    emit_effect(&app, &shell, &effect)
}

#[tauri::command]
fn window_pointer_up(state: State<Mutex<DesktopShell>>) -> Result<(), String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    shell.window_pointer_up();
    Ok(())
}

#[tauri::command]
fn window_control(
    id: String,
    control: WindowControl,
    app: AppHandle,
    state: State<Mutex<DesktopShell>>,
) -> Result<(), String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    let effect = shell.window_control(&id, control);
    emit_effect(&app, &shell, &effect)
}

#[tauri::command]
fn set_viewport(width: f64, height: f64, state: State<Mutex<DesktopShell>>) -> Result<(), String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    shell.set_viewport(Viewport { width, height });
    Ok(())
}

// ===== Desktop Shell Commands =====

#[tauri::command]
fn desktop_snapshot(state: State<Mutex<DesktopShell>>) -> Result<DesktopSnapshot, String> {
    let shell = state.lock().map_err(|e| e.to_string())?;
    Ok(shell.snapshot())
}

#[tauri::command]
fn click_desktop(app: AppHandle, state: State<Mutex<DesktopShell>>) -> Result<(), String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    if shell.click_desktop() {
        emit_selection(&app, &shell)?;
    }
    Ok(())
}

#[tauri::command]
fn click_icon(id: String, app: AppHandle, state: State<Mutex<DesktopShell>>) -> Result<(), String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    if shell.click_icon(&id) {
        emit_selection(&app, &shell)?;
    }
    Ok(())
}

#[tauri::command]
fn double_click_icon(
    id: String,
    app: AppHandle,
    state: State<Mutex<DesktopShell>>,
) -> Result<Option<DesktopWindow>, String> {
    let mut shell = state.lock().map_err(|e| e.to_string())?;
    let window = shell.double_click_icon(&id).cloned();

    if let Some(window) = &window {
        window_opened(&app, window)?;
    }
    Ok(window)
}

#[tauri::command]
fn list_programs() -> Vec<ProgramDescriptor> {
    PROGRAMS.to_vec()
}

// ===== Menu Bar Commands =====

#[tauri::command]
fn get_menu_bar(config: State<DesktopConfig>) -> MenuBarView {
    menu_bar::menu_bar(config.clock_24h)
}

/// Re-read the clock every tick and tell the webview when the text changes
async fn run_clock(app: AppHandle, twenty_four_hour: bool) {
    let mut ticker = tokio::time::interval(menu_bar::CLOCK_TICK);
    let mut last = String::new();

    loop {
        ticker.tick().await;
        let time = menu_bar::current_time(twenty_four_hour);
        if time == last {
            continue;
        }
        if let Err(e) = app.emit("clock-tick", ClockTickPayload { time: time.clone() }) {
            warn!(error = %e, "failed to emit clock tick");
        }
        last = time;
    }
}

// ===== Wallet Commands =====

#[tauri::command]
fn wallet_status(state: State<Mutex<WalletConnection>>) -> Result<WalletView, String> {
    let wallet = state.lock().map_err(|e| e.to_string())?;
    Ok(wallet.view())
}

/// Pick up an account the user already authorized, without prompting
async fn check_wallet(app: &AppHandle) -> Result<WalletView, String> {
    let backend = app.state::<WalletBackend>();
    let state = app.state::<Mutex<WalletConnection>>();

    let Some(provider) = &backend.0 else {
        let wallet = state.lock().map_err(|e| e.to_string())?;
        return Ok(wallet.view());
    };

    let result = wallet::check(provider).await;

    let view = {
        let mut wallet = state.lock().map_err(|e| e.to_string())?;
        wallet.finish_check(result);
        wallet.view()
    };
    emit_wallet(app, &view)?;
    Ok(view)
}

#[tauri::command]
async fn wallet_check(app: AppHandle) -> Result<WalletView, String> {
    check_wallet(&app).await
}

/// Ask the wallet to authorize an account. Failures come back as a notice in the view.
#[tauri::command]
async fn wallet_connect(
    app: AppHandle,
    backend: State<'_, WalletBackend>,
    state: State<'_, Mutex<WalletConnection>>,
) -> Result<WalletView, String> {
    let started = {
        let mut wallet = state.lock().map_err(|e| e.to_string())?;
        if wallet.begin_connect().is_err() {
            let view = wallet.view();
            drop(wallet);
            emit_wallet(&app, &view)?;
            return Ok(view);
        }
        wallet.view()
    };
    emit_wallet(&app, &started)?;

    let result = match &backend.0 {
        Some(provider) => wallet::connect(provider).await,
        None => Err(wallet::WalletError::NoProvider),
    };

    let view = {
        let mut wallet = state.lock().map_err(|e| e.to_string())?;
        wallet.finish_connect(result);
        wallet.view()
    };
    emit_wallet(&app, &view)?;
    Ok(view)
}

/// Re-read the balance of the connected account
#[tauri::command]
async fn wallet_refresh(app: AppHandle) -> Result<WalletView, String> {
    check_wallet(&app).await
}

#[tauri::command]
fn wallet_disconnect(
    app: AppHandle,
    state: State<Mutex<WalletConnection>>,
) -> Result<WalletView, String> {
    let view = {
        let mut wallet = state.lock().map_err(|e| e.to_string())?;
        wallet.disconnect();
        wallet.view()
    };
    emit_wallet(&app, &view)?;
    Ok(view)
}

/// Open the wallet download page in the system browser
#[tauri::command]
fn open_wallet_install_page(app: AppHandle, config: State<DesktopConfig>) -> Result<(), String> {
    info!(url = %config.wallet.install_url, "opening wallet install page");
    app.opener()
        .open_url(config.wallet.install_url.clone(), None::<&str>)
        .map_err(|e| e.to_string())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (e.g. from a test harness) is harmless
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let config_dir = app.path().app_config_dir().ok();
            let config = DesktopConfig::load(config_dir.as_deref());
            debug!(?config, "desktop config");

            let provider = match &config.wallet.rpc_url {
                Some(url) => {
                    info!(url = %url, "wallet provider configured");
                    Some(JsonRpcProvider::new(url.clone()))
                }
                None => {
                    info!("no wallet provider configured");
                    None
                }
            };

            app.manage(Mutex::new(DesktopShell::new(config.viewport())));
            app.manage(Mutex::new(WalletConnection::new(provider.is_some())));
            app.manage(WalletBackend(provider));

            // Menu bar clock
            tauri::async_runtime::spawn(run_clock(app.handle().clone(), config.clock_24h));

            app.manage(config);
            info!("desktop initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Window management commands
            open_program,
            open_window,
            close_window,
            focus_window,
            move_window,
            minimize_window,
            restore_window,
            list_windows,
            list_minimized,
            // Window frame commands
            window_pointer_down,
            window_pointer_move,
            window_pointer_up,
            window_control,
            set_viewport,
            // Desktop shell commands
            desktop_snapshot,
            click_desktop,
            click_icon,
            double_click_icon,
            list_programs,
            // Menu bar
            get_menu_bar,
            // Wallet
            wallet_status,
            wallet_check,
            wallet_connect,
            wallet_refresh,
            wallet_disconnect,
            open_wallet_install_page,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
