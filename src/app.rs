use leptos::*;
use std::rc::Rc;

use crate::core::contract::EscrowContract;
use crate::core::gateway::ChainGateway;
use crate::core::settings::UserSettings;
use crate::pages::projects_page::ProjectsPage;
use crate::pages::settings_panel::SettingsPanel;

// main app component
#[component]
pub fn App() -> impl IntoView {
    let settings = create_rw_signal(UserSettings::load());
    let show_settings = create_rw_signal(false);

    // rebuilt whenever settings are saved, which also reloads the projects
    let projects_page = move || {
        let current = settings.get();
        let network = current.network;

        log::info!(
            "Starting on {} (chain {}), contract {}",
            network.display_name(),
            network.chain_id(),
            current.contract_address().unwrap_or_else(|| "not configured".to_string())
        );

        let gateway: Rc<dyn ChainGateway> = Rc::new(EscrowContract::from_settings(&current));
        view! { <ProjectsPage gateway=gateway network=network /> }
    };

    view! {
        <main class="container">
            <div class="app-toolbar">
                <button
                    class="settings-button"
                    on:click=move |_| show_settings.update(|shown| *shown = !*shown)
                >
                    "Settings"
                </button>
            </div>

            <Show when=move || show_settings.get()>
                <SettingsPanel settings=settings on_close=move |_| show_settings.set(false) />
            </Show>

            {projects_page}
        </main>
    }
}
