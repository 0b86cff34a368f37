use leptos::*;
use std::rc::Rc;

use crate::core::constants::CURRENCY_SYMBOL;
use crate::core::project_state::ProjectRecord;

/// One collapsible row of the projects list
#[component]
pub fn ProjectCard(
    project: ProjectRecord,
    /// Show the remove button (open project on the client tab)
    removable: bool,
    busy: Signal<bool>,
    on_toggle: Rc<dyn Fn(u64)>,
    on_remove: Rc<dyn Fn(Option<u64>)>,
) -> impl IntoView {
    let id = project.id;
    let expanded = project.expanded;
    let card_class = if expanded {
        "yprojects-card expanded-card"
    } else {
        "yprojects-card"
    };

    let details = expanded.then(|| {
        let remove_button = removable.then(|| {
            view! {
                <button
                    class="remove-project-button"
                    prop:disabled=move || busy.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_remove(Some(id));
                    }
                >
                    "Remove Project"
                </button>
            }
        });

        view! {
            <div class="yprojects-details">
                <p>{project.description.clone()}</p>
                <p class="project-fee">
                    "Project fee: "
                    <strong>{project.fee_amount.clone()}</strong>
                    " "
                    {CURRENCY_SYMBOL}
                </p>
                {remove_button}
            </div>
        }
    });

    view! {
        <div class=card_class>
            <div class="yprojects-header" on:click=move |_| on_toggle(id)>
                <h3>{project.title.clone()}</h3>
                <div class="right-section">
                    <span class=project.status.badge_class()>{project.status.label()}</span>
                    <button class="yexpand-button">
                        <span class="material-icons">
                            {if expanded { "expand_less" } else { "expand_more" }}
                        </span>
                    </button>
                </div>
            </div>
            {details}
        </div>
    }
}
