use leptos::*;
use leptos::ev::SubmitEvent;

use crate::core::network_config::NetworkType;
use crate::core::settings::UserSettings;

/// Network and contract address settings, saved per network
#[component]
pub fn SettingsPanel(
    settings: RwSignal<UserSettings>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let draft = create_rw_signal(settings.get_untracked());
    let error = create_rw_signal::<Option<String>>(None);

    // each network keeps its own override
    let select_network = move |network: NetworkType| draft.set(UserSettings::load_for(network));

    let handle_save = move |ev: SubmitEvent| {
        ev.prevent_default();
        let updated = draft.get_untracked();
        match updated.save() {
            Ok(()) => {
                error.set(None);
                settings.set(updated);
                on_close.call(());
            }
            Err(e) => {
                log::error!("Failed to save settings: {}", e);
                error.set(Some(e));
            }
        }
    };

    let default_address = move || {
        draft.with(|d| d.network_config().contract_address.unwrap_or("not configured").to_string())
    };

    view! {
        <div class="settings-panel">
            <form on:submit=handle_save>
                <h2>"Settings"</h2>

                <div class="network-group">
                    <h4>"Network"</h4>
                    {NetworkType::ALL
                        .into_iter()
                        .map(|network| {
                            let id = format!("network-{}", network.as_str());
                            view! {
                                <div class="radio-option">
                                    <input
                                        type="radio"
                                        id=id.clone()
                                        name="network"
                                        prop:checked=move || draft.with(|d| d.network == network)
                                        on:change=move |_| select_network(network)
                                    />
                                    <label for=id>{network.display_name()}</label>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>

                <div class="contract-group">
                    <label for="contract-address">"Escrow contract address"</label>
                    <input
                        type="text"
                        id="contract-address"
                        placeholder="0x..."
                        prop:value=move || draft.with(|d| d.custom_contract_address.clone())
                        on:input=move |ev| {
                            draft.update(|d| d.custom_contract_address = event_target_value(&ev));
                        }
                    />
                    <p class="help-text">
                        "Leave empty to use the built-in address: " {default_address}
                    </p>
                </div>

                {move || error.get().map(|e| view! { <div class="alert alert-error">{e}</div> })}

                <div class="modal-buttons">
                    <button type="submit">"Save"</button>
                    <button type="button" on:click=move |_| on_close.call(())>"Cancel"</button>
                </div>
            </form>
        </div>
    }
}
