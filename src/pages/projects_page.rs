use leptos::*;
use std::rc::Rc;
use std::time::Duration;

use crate::core::gateway::ChainGateway;
use crate::core::network_config::NetworkType;
use crate::core::notice::{Notice, NoticeLevel, Notifier};
use crate::core::project_state::{ProjectsState, ProjectsTab};
use crate::core::projects::ProjectsController;
use super::create_project_modal::CreateProjectModal;
use super::project_card::ProjectCard;

pub type PageState = RwSignal<ProjectsState>;
pub type PageController = ProjectsController<PageState>;

/// How long success and info notices stay on screen
const NOTICE_DISMISS_MS: u64 = 4_000;

/// Notice on screen, tagged so a timer only clears the one it was set for
#[derive(Debug, Clone, PartialEq)]
struct ShownNotice {
    id: u64,
    notice: Notice,
}

/// Clear the banner if it still shows notice `id`
fn dismiss(current: &mut Option<ShownNotice>, id: u64) {
    if current.as_ref().map(|shown| shown.id) == Some(id) {
        *current = None;
    }
}

/// Shows notices in the page banner; errors stay until closed
#[derive(Clone, Copy)]
struct BannerNotifier {
    banner: RwSignal<Option<ShownNotice>>,
    next_id: StoredValue<u64>,
}

impl Notifier for BannerNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => log::warn!("Notice: {}", notice.message),
            _ => log::info!("Notice: {}", notice.message),
        }

        let auto_dismiss = notice.level != NoticeLevel::Error;
        self.next_id.update_value(|id| *id += 1);
        let id = self.next_id.get_value();
        self.banner.set(Some(ShownNotice { id, notice }));

        if auto_dismiss {
            let banner = self.banner;
            set_timeout(
                move || banner.update(|current| dismiss(current, id)),
                Duration::from_millis(NOTICE_DISMISS_MS),
            );
        }
    }
}

/// Shorten address for display (e.g., "0x1234...abcd")
fn shorten_address(addr: &str) -> String {
    if addr.len() > 12 {
        format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
    } else {
        addr.to_string()
    }
}

/// Projects page - the user's projects as client and as freelancer
#[component]
pub fn ProjectsPage(
    gateway: Rc<dyn ChainGateway>,
    network: NetworkType,
) -> impl IntoView {
    let state: PageState = create_rw_signal(ProjectsState::default());
    let banner = create_rw_signal::<Option<ShownNotice>>(None);
    let notifier = BannerNotifier {
        banner,
        next_id: store_value(0),
    };

    let controller = store_value(ProjectsController::new(state, gateway, Rc::new(notifier)));

    // initial load for the default tab
    {
        let controller = controller.get_value();
        spawn_local(async move {
            controller.load().await;
        });
    }

    let busy = Signal::derive(move || state.with(|s| s.busy));
    // typing in the modal must not rebuild the list
    let rows = create_memo(move |_| state.with(|s| s.visible_rows()));

    let select_tab = move |tab: ProjectsTab| {
        let controller = controller.get_value();
        spawn_local(async move {
            controller.select_tab(tab).await;
        });
    };

    let on_toggle: Rc<dyn Fn(u64)> = Rc::new(move |id| {
        controller.with_value(|c| c.toggle_expand(id));
    });

    let on_remove: Rc<dyn Fn(Option<u64>)> = Rc::new(move |id| {
        let controller = controller.get_value();
        spawn_local(async move {
            controller.remove_project(id).await;
        });
    });

    let open_modal = move |_| {
        controller.with_value(|c| c.open_modal());
    };

    view! {
        <div class="projects-page">
            <header class="projects-header">
                <h1>"Your Projects"</h1>
                <p>"View and manage your ongoing projects as a Client or Freelancer."</p>
                <div class="wallet-info">
                    <span class="network-badge" class:production=network.is_production()>
                        {network.display_name()}
                    </span>
                    {move || state.with(|s| s.wallet_address.clone()).map(|addr| view! {
                        <span class="wallet-address" title=addr.clone()>
                            {shorten_address(&addr)}
                        </span>
                    })}
                </div>
            </header>

            {move || banner.get().map(|shown| view! {
                <div class=shown.notice.level.css_class()>
                    <span>{shown.notice.message}</span>
                    <button class="alert-close" on:click=move |_| banner.set(None)>"×"</button>
                </div>
            })}

            <div class="tabs">
                {[ProjectsTab::Client, ProjectsTab::Freelancer]
                    .into_iter()
                    .map(|tab| view! {
                        <button
                            class="tab"
                            class:active=move || state.with(|s| s.active_tab == tab)
                            on:click=move |_| select_tab(tab)
                        >
                            {tab.label()}
                        </button>
                    })
                    .collect_view()}
            </div>

            <Show when=move || state.with(|s| s.active_tab == ProjectsTab::Client)>
                <div>
                    <button class="create-button" on:click=open_modal>
                        "+ Create a New Project"
                    </button>
                </div>
            </Show>

            <div class="yprojects-list">
                {move || {
                    let visible = rows.get();

                    if visible.is_empty() {
                        view! {
                            <div class="empty-state">
                                <p>"No projects to show."</p>
                            </div>
                        }.into_view()
                    } else {
                        visible.into_iter()
                            .map(|(project, removable)| view! {
                                <ProjectCard
                                    project=project
                                    removable=removable
                                    busy=busy
                                    on_toggle=on_toggle.clone()
                                    on_remove=on_remove.clone()
                                />
                            })
                            .collect_view()
                    }
                }}
            </div>

            <Show when=move || state.with(|s| s.show_modal)>
                <CreateProjectModal state=state controller=controller />
            </Show>
        </div>
    }
}
