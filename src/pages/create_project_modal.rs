use leptos::*;
use leptos::ev::SubmitEvent;

use crate::core::constants::{CURRENCY_SYMBOL, VERIFICATION_FEE_DISPLAY};
use crate::core::project_state::DraftField;
use super::projects_page::{PageController, PageState};

/// Create-project dialog bound to the page draft
#[component]
pub fn CreateProjectModal(
    state: PageState,
    controller: StoredValue<PageController>,
) -> impl IntoView {
    let busy = move || state.with(|s| s.busy);

    let field_value = move |field: DraftField| state.with(|s| s.draft.get(field).to_string());

    let set_field = move |field: DraftField, value: String| {
        controller.with_value(|c| c.set_draft_field(field, value));
    };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let controller = controller.get_value();
        spawn_local(async move {
            controller.create_project().await;
        });
    };

    let handle_cancel = move |_| {
        controller.with_value(|c| c.cancel_modal());
    };

    view! {
        <div class="modal">
            <form class="modal-content" on:submit=handle_submit>
                <h2>"Create New Project"</h2>
                <input
                    type="text"
                    name="name"
                    placeholder="Project Name"
                    prop:value=move || field_value(DraftField::Name)
                    on:input=move |ev| set_field(DraftField::Name, event_target_value(&ev))
                />
                <textarea
                    name="description"
                    placeholder="Project Description"
                    prop:value=move || field_value(DraftField::Description)
                    on:input=move |ev| set_field(DraftField::Description, event_target_value(&ev))
                ></textarea>
                <input
                    type="text"
                    name="projectFee"
                    inputmode="decimal"
                    placeholder=format!("Project Fee (in {})", CURRENCY_SYMBOL)
                    prop:value=move || field_value(DraftField::FeeAmount)
                    on:input=move |ev| set_field(DraftField::FeeAmount, event_target_value(&ev))
                />
                <p class="verification-fee">
                    {format!("Verification fee: {} {}", VERIFICATION_FEE_DISPLAY, CURRENCY_SYMBOL)}
                </p>
                <div class="modal-buttons">
                    <button type="submit" prop:disabled=busy>
                        {move || if busy() { "Submitting..." } else { "Submit" }}
                    </button>
                    <button type="button" on:click=handle_cancel>
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}
