use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::constants::*;
use super::gateway::{ChainGateway, CreateProjectCall, GatewayError};
use super::notice::{Notice, Notifier};
use super::project_state::{DraftField, FormDraft, ProjectRecord, ProjectsTab, ViewStore};
use super::units::{parse_ether, UnitError};

/// Why a creation or removal did not go through
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    Amount(UnitError),
    Gateway(GatewayError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Amount(err) => write!(f, "Invalid project fee: {}", err),
            SubmitError::Gateway(err) => write!(f, "{}", err),
        }
    }
}

impl From<UnitError> for SubmitError {
    fn from(err: UnitError) -> Self {
        SubmitError::Amount(err)
    }
}

impl From<GatewayError> for SubmitError {
    fn from(err: GatewayError) -> Self {
        SubmitError::Gateway(err)
    }
}

/// Current time in seconds since the unix epoch
pub fn unix_timestamp() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Date::now() / 1000.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Drives the projects page: loads lists, handles the form and sends
/// transactions through the injected gateway.
///
/// Loads are never cancelled. When several are in flight the one that
/// resolves last writes the list, even if it was issued first.
#[derive(Clone)]
pub struct ProjectsController<S: ViewStore> {
    store: S,
    gateway: Rc<dyn ChainGateway>,
    notifier: Rc<dyn Notifier>,
    verification_fee: u128,
    clock: fn() -> u64,
    load_generation: Rc<Cell<u64>>,
}

impl<S: ViewStore> ProjectsController<S> {
    pub fn new(store: S, gateway: Rc<dyn ChainGateway>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            store,
            gateway,
            notifier,
            verification_fee: VERIFICATION_FEE_WEI,
            clock: unix_timestamp,
            load_generation: Rc::new(Cell::new(0)),
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reload the list of the active tab from the chain
    pub async fn load(&self) {
        let tab = self.store.read(|s| s.active_tab);
        let generation = self.load_generation.get() + 1;
        self.load_generation.set(generation);

        match self.fetch_projects(tab).await {
            Ok(projects) => {
                let latest = self.load_generation.get();
                if generation != latest {
                    log::warn!(
                        "Applying {:?} projects from load #{} after newer load #{} was issued",
                        tab,
                        generation,
                        latest
                    );
                }
                log::info!("Loaded {} {:?} projects", projects.len(), tab);
                self.store.write(|s| s.replace_projects(tab, projects));
            }
            Err(GatewayError::WalletMissing) => {
                self.notifier.notify(Notice::error(NOTICE_WALLET_MISSING));
            }
            Err(e) => {
                log::error!("Error loading projects: {}", e);
            }
        }
    }

    async fn fetch_projects(&self, tab: ProjectsTab) -> Result<Vec<ProjectRecord>, GatewayError> {
        if !self.gateway.is_available() {
            return Err(GatewayError::WalletMissing);
        }

        let address = self.gateway.signer_address().await?;
        self.store.write(|s| s.wallet_address = Some(address.clone()));
        let raw = match tab {
            ProjectsTab::Client => self.gateway.projects_by_owner(&address).await?,
            ProjectsTab::Freelancer => self.gateway.projects_for_freelancer(&address).await?,
        };
        Ok(raw.into_iter().map(ProjectRecord::from_raw).collect())
    }

    /// Switch tabs; reloads only when the tab actually changes
    pub async fn select_tab(&self, tab: ProjectsTab) {
        let changed = self.store.read(|s| s.active_tab != tab);
        if !changed {
            return;
        }
        self.store.write(|s| s.active_tab = tab);
        self.load().await;
    }

    pub fn toggle_expand(&self, project_id: u64) {
        self.store.write(|s| s.toggle_expanded(project_id));
    }

    pub fn open_modal(&self) {
        self.store.write(|s| s.show_modal = true);
    }

    /// Close the modal and throw the draft away
    pub fn cancel_modal(&self) {
        self.store.write(|s| {
            s.show_modal = false;
            s.draft.clear();
        });
    }

    pub fn set_draft_field(&self, field: DraftField, value: String) {
        self.store.write(|s| s.draft.set(field, value));
    }

    /// Submit the draft as a new project and wait for confirmation
    pub async fn create_project(&self) {
        let (draft, busy) = self.store.read(|s| (s.draft.clone(), s.busy));
        if busy {
            log::debug!("Ignoring project submission while another is in progress");
            return;
        }

        if let Err(field) = draft.validate() {
            log::debug!("Project draft is missing {:?}", field);
            self.notifier.notify(Notice::error(NOTICE_FILL_ALL_FIELDS));
            return;
        }

        if !self.gateway.is_available() {
            self.notifier.notify(Notice::error(NOTICE_WALLET_MISSING));
            return;
        }

        self.store.write(|s| s.busy = true);

        match self.submit_creation(&draft).await {
            Ok(()) => {
                self.notifier.notify(Notice::success(NOTICE_PROJECT_CREATED));
                self.store.write(|s| {
                    s.draft.clear();
                    s.show_modal = false;
                    s.busy = false;
                });
                self.load().await;
            }
            Err(e) => {
                log::error!("Error creating project: {}", e);
                self.store.write(|s| s.busy = false);
                self.notifier.notify(Notice::error(NOTICE_CREATE_FAILED));
            }
        }
    }

    async fn submit_creation(&self, draft: &FormDraft) -> Result<(), SubmitError> {
        let fee = parse_ether(&draft.fee_amount)?;
        let value = fee
            .checked_add(self.verification_fee)
            .ok_or(UnitError::Overflow)?;

        let call = CreateProjectCall {
            name: draft.name.clone(),
            description: draft.description.clone(),
            timestamp: (self.clock)(),
            fee,
            value,
        };

        let tx = self.gateway.create_project(call).await?;
        self.notifier
            .notify(Notice::info(format!("Transaction {} submitted, waiting for confirmation...", tx)));
        self.gateway.wait_for_confirmation(&tx).await?;
        Ok(())
    }

    /// Remove a project by id and reload the active tab
    pub async fn remove_project(&self, project_id: Option<u64>) {
        let Some(project_id) = project_id else {
            self.notifier.notify(Notice::error(NOTICE_INVALID_PROJECT_ID));
            return;
        };

        self.store.write(|s| s.busy = true);

        match self.submit_removal(project_id).await {
            Ok(()) => {
                self.notifier.notify(Notice::success(NOTICE_PROJECT_REMOVED));
                self.load().await;
            }
            Err(e) => {
                log::error!("Error removing project {}: {}", project_id, e);
                self.notifier.notify(Notice::error(format!("Error: {}", e)));
            }
        }

        self.store.write(|s| s.busy = false);
    }

    async fn submit_removal(&self, project_id: u64) -> Result<(), GatewayError> {
        if !self.gateway.is_available() {
            return Err(GatewayError::WalletMissing);
        }

        let tx = self.gateway.remove_project(project_id).await?;
        self.gateway.wait_for_confirmation(&tx).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::abi::RawProject;
    use crate::core::gateway::{TxHash, TxReceipt};
    use crate::core::notice::NoticeLevel;
    use crate::core::project_state::ProjectsState;
    use crate::core::status::ProjectStatus;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    const ADDRESS: &str = "0x00000000000000000000000000000000000000aa";

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Signer,
        ByOwner(String),
        ForFreelancer(String),
        Create(CreateProjectCall),
        Remove(u64),
        Wait(TxHash),
    }

    /// Scripted gateway recording every call
    #[derive(Default)]
    struct FakeGateway {
        missing_wallet: bool,
        calls: RefCell<Vec<Call>>,
        owner_projects: RefCell<Vec<RawProject>>,
        freelancer_projects: RefCell<Vec<RawProject>>,
        fail_reads: Cell<bool>,
        fail_submit: bool,
        fail_confirmation: bool,
        /// When non-empty, reads wait on these channels instead of answering directly
        pending_reads: RefCell<VecDeque<oneshot::Receiver<Vec<RawProject>>>>,
    }

    impl FakeGateway {
        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn gateway_calls(&self) -> usize {
            self.calls().len()
        }

        async fn read(&self, stored: &RefCell<Vec<RawProject>>) -> Result<Vec<RawProject>, GatewayError> {
            if self.fail_reads.get() {
                return Err(GatewayError::Decode("malformed response".to_string()));
            }
            let pending = self.pending_reads.borrow_mut().pop_front();
            match pending {
                Some(rx) => rx
                    .await
                    .map_err(|_| GatewayError::Decode("dropped".to_string())),
                None => Ok(stored.borrow().clone()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ChainGateway for FakeGateway {
        fn is_available(&self) -> bool {
            !self.missing_wallet
        }

        async fn signer_address(&self) -> Result<String, GatewayError> {
            self.calls.borrow_mut().push(Call::Signer);
            Ok(ADDRESS.to_string())
        }

        async fn projects_by_owner(&self, address: &str) -> Result<Vec<RawProject>, GatewayError> {
            self.calls.borrow_mut().push(Call::ByOwner(address.to_string()));
            self.read(&self.owner_projects).await
        }

        async fn projects_for_freelancer(&self, address: &str) -> Result<Vec<RawProject>, GatewayError> {
            self.calls.borrow_mut().push(Call::ForFreelancer(address.to_string()));
            self.read(&self.freelancer_projects).await
        }

        async fn create_project(&self, call: CreateProjectCall) -> Result<TxHash, GatewayError> {
            self.calls.borrow_mut().push(Call::Create(call));
            if self.fail_submit {
                return Err(GatewayError::Reverted("0xcreate".to_string()));
            }
            Ok(TxHash("0xcreate".to_string()))
        }

        async fn remove_project(&self, project_id: u64) -> Result<TxHash, GatewayError> {
            self.calls.borrow_mut().push(Call::Remove(project_id));
            if self.fail_submit {
                return Err(GatewayError::Reverted("0xremove".to_string()));
            }
            Ok(TxHash("0xremove".to_string()))
        }

        async fn wait_for_confirmation(&self, tx: &TxHash) -> Result<TxReceipt, GatewayError> {
            self.calls.borrow_mut().push(Call::Wait(tx.clone()));
            if self.fail_confirmation {
                return Err(GatewayError::ConfirmationTimeout(tx.0.clone()));
            }
            Ok(TxReceipt { hash: tx.clone(), block_number: Some(1) })
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: RefCell<Vec<Notice>>,
    }

    impl RecordingNotifier {
        fn messages(&self, level: NoticeLevel) -> Vec<String> {
            self.notices
                .borrow()
                .iter()
                .filter(|n| n.level == level)
                .map(|n| n.message.clone())
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.borrow_mut().push(notice);
        }
    }

    type Store = Rc<RefCell<ProjectsState>>;

    fn raw(id: u64, name: &str, status: u64) -> RawProject {
        RawProject {
            id,
            name: name.to_string(),
            description: format!("{} description", name),
            status,
            project_fee: 1_000_000_000_000_000_000,
        }
    }

    fn setup(gateway: FakeGateway) -> (ProjectsController<Store>, Rc<FakeGateway>, Rc<RecordingNotifier>) {
        let gateway = Rc::new(gateway);
        let notifier = Rc::new(RecordingNotifier::default());
        let store: Store = Rc::new(RefCell::new(ProjectsState::default()));
        let controller = ProjectsController::new(store, gateway.clone(), notifier.clone())
            .with_clock(|| 1_700_000_000);
        (controller, gateway, notifier)
    }

    fn fill_draft(controller: &ProjectsController<Store>, name: &str, description: &str, fee: &str) {
        controller.open_modal();
        controller.set_draft_field(DraftField::Name, name.to_string());
        controller.set_draft_field(DraftField::Description, description.to_string());
        controller.set_draft_field(DraftField::FeeAmount, fee.to_string());
    }

    fn state(controller: &ProjectsController<Store>) -> ProjectsState {
        controller.store().borrow().clone()
    }

    #[test]
    fn load_fills_client_list_for_signer() {
        let gateway = FakeGateway::default();
        gateway.owner_projects.borrow_mut().push(raw(1, "Logo", 0));
        gateway.owner_projects.borrow_mut().push(raw(2, "Site", 9));
        let (controller, gateway, _) = setup(gateway);

        block_on(controller.load());

        let state = state(&controller);
        assert_eq!(state.client_projects.len(), 2);
        assert_eq!(state.client_projects[0].status, ProjectStatus::Open);
        assert_eq!(state.client_projects[1].status.label(), "Unknown");
        assert_eq!(state.client_projects[0].fee_amount, "1.0");
        assert!(state.freelancer_projects.is_empty());
        assert_eq!(state.wallet_address.as_deref(), Some(ADDRESS));
        assert_eq!(
            gateway.calls(),
            vec![Call::Signer, Call::ByOwner(ADDRESS.to_string())]
        );
    }

    #[test]
    fn load_without_wallet_notifies_and_keeps_lists() {
        let (controller, gateway, notifier) = setup(FakeGateway {
            missing_wallet: true,
            ..FakeGateway::default()
        });

        block_on(controller.load());

        assert_eq!(gateway.gateway_calls(), 0);
        assert_eq!(notifier.messages(NoticeLevel::Error), vec![NOTICE_WALLET_MISSING]);
        assert!(state(&controller).client_projects.is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_list_silently() {
        let gateway = FakeGateway::default();
        gateway.owner_projects.borrow_mut().push(raw(1, "Logo", 0));
        let (controller, gateway, notifier) = setup(gateway);
        block_on(controller.load());

        gateway.fail_reads.set(true);
        gateway.owner_projects.borrow_mut().clear();
        block_on(controller.load());

        assert_eq!(state(&controller).client_projects.len(), 1);
        assert!(notifier.notices.borrow().is_empty());
    }

    #[test]
    fn reload_resets_expansion() {
        let gateway = FakeGateway::default();
        gateway.owner_projects.borrow_mut().push(raw(1, "Logo", 0));
        let (controller, _, _) = setup(gateway);
        block_on(controller.load());

        controller.toggle_expand(1);
        assert!(state(&controller).client_projects[0].expanded);

        block_on(controller.load());
        assert!(!state(&controller).client_projects[0].expanded);
    }

    #[test]
    fn selecting_freelancer_tab_queries_assigned_projects() {
        let gateway = FakeGateway::default();
        gateway.owner_projects.borrow_mut().push(raw(1, "Logo", 0));
        gateway.freelancer_projects.borrow_mut().push(raw(5, "Audit", 1));
        let (controller, gateway, _) = setup(gateway);
        block_on(controller.load());

        controller.toggle_expand(1);
        block_on(controller.select_tab(ProjectsTab::Freelancer));

        let state = state(&controller);
        assert_eq!(state.active_tab, ProjectsTab::Freelancer);
        assert_eq!(state.visible_projects()[0].id, 5);
        // client list untouched by the switch
        assert!(state.client_projects[0].expanded);
        assert_eq!(
            gateway.calls().last(),
            Some(&Call::ForFreelancer(ADDRESS.to_string()))
        );
    }

    #[test]
    fn selecting_current_tab_does_not_reload() {
        let (controller, gateway, _) = setup(FakeGateway::default());
        block_on(controller.select_tab(ProjectsTab::Client));
        assert_eq!(gateway.gateway_calls(), 0);
    }

    #[test]
    fn toggle_does_not_touch_other_tab() {
        let gateway = FakeGateway::default();
        gateway.owner_projects.borrow_mut().push(raw(3, "Logo", 0));
        gateway.freelancer_projects.borrow_mut().push(raw(3, "Audit", 1));
        let (controller, _, _) = setup(gateway);
        block_on(controller.load());
        block_on(controller.select_tab(ProjectsTab::Freelancer));

        controller.toggle_expand(3);

        let state = state(&controller);
        assert!(state.freelancer_projects[0].expanded);
        assert!(!state.client_projects[0].expanded);
    }

    #[test]
    fn quick_tab_switches_land_in_their_own_lists() {
        let gateway = FakeGateway::default();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        gateway.pending_reads.borrow_mut().push_back(first_rx);
        gateway.pending_reads.borrow_mut().push_back(second_rx);
        let (controller, _, _) = setup(gateway);

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        // client -> freelancer -> client before anything resolves
        let c = controller.clone();
        spawner
            .spawn_local(async move { c.select_tab(ProjectsTab::Freelancer).await })
            .unwrap();
        pool.run_until_stalled();
        let c = controller.clone();
        spawner
            .spawn_local(async move { c.select_tab(ProjectsTab::Client).await })
            .unwrap();
        pool.run_until_stalled();

        // newer request answers first, older one last
        second_tx.send(vec![raw(2, "Newer", 0)]).unwrap();
        pool.run_until_stalled();
        first_tx.send(vec![raw(1, "Older", 1)]).unwrap();
        pool.run_until_stalled();

        let state = state(&controller);
        assert_eq!(state.active_tab, ProjectsTab::Client);
        assert_eq!(state.client_projects[0].title, "Newer");
        assert_eq!(state.freelancer_projects[0].title, "Older");
    }

    #[test]
    fn out_of_order_responses_for_same_tab_keep_the_later_resolution() {
        let gateway = FakeGateway::default();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        gateway.pending_reads.borrow_mut().push_back(first_rx);
        gateway.pending_reads.borrow_mut().push_back(second_rx);
        let (controller, _, _) = setup(gateway);

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..2 {
            let c = controller.clone();
            spawner.spawn_local(async move { c.load().await }).unwrap();
            pool.run_until_stalled();
        }

        second_tx.send(vec![raw(2, "Fresh", 0)]).unwrap();
        pool.run_until_stalled();
        first_tx.send(vec![raw(1, "Stale", 0)]).unwrap();
        pool.run_until_stalled();

        assert_eq!(state(&controller).client_projects[0].title, "Stale");
    }

    #[test]
    fn incomplete_draft_never_reaches_gateway() {
        let (controller, gateway, notifier) = setup(FakeGateway::default());
        fill_draft(&controller, "", "x", "1");

        block_on(controller.create_project());

        assert_eq!(gateway.gateway_calls(), 0);
        assert_eq!(notifier.messages(NoticeLevel::Error), vec![NOTICE_FILL_ALL_FIELDS]);
        let state = state(&controller);
        assert!(state.show_modal);
        assert!(!state.busy);
        assert_eq!(state.draft.description, "x");
    }

    #[test]
    fn create_attaches_fee_plus_surcharge_and_resets_form() {
        let gateway = FakeGateway::default();
        gateway.owner_projects.borrow_mut().push(raw(1, "Logo", 0));
        let (controller, gateway, notifier) = setup(gateway);
        fill_draft(&controller, "Logo", "desc", "1.0");

        block_on(controller.create_project());

        let expected = CreateProjectCall {
            name: "Logo".to_string(),
            description: "desc".to_string(),
            timestamp: 1_700_000_000,
            fee: 1_000_000_000_000_000_000,
            value: 1_000_300_000_000_000_000,
        };
        let calls = gateway.calls();
        assert_eq!(calls[0], Call::Create(expected));
        assert_eq!(calls[1], Call::Wait(TxHash("0xcreate".to_string())));
        // reload after confirmation
        assert_eq!(calls[3], Call::ByOwner(ADDRESS.to_string()));

        let state = state(&controller);
        assert_eq!(state.draft, FormDraft::default());
        assert!(!state.show_modal);
        assert!(!state.busy);
        assert_eq!(state.client_projects.len(), 1);
        assert_eq!(notifier.messages(NoticeLevel::Success), vec![NOTICE_PROJECT_CREATED]);
    }

    #[test]
    fn failed_creation_keeps_modal_and_draft() {
        let (controller, _, notifier) = setup(FakeGateway {
            fail_confirmation: true,
            ..FakeGateway::default()
        });
        fill_draft(&controller, "Logo", "desc", "1.0");

        block_on(controller.create_project());

        let state = state(&controller);
        assert!(state.show_modal);
        assert!(!state.busy);
        assert_eq!(state.draft.name, "Logo");
        assert_eq!(notifier.messages(NoticeLevel::Error), vec![NOTICE_CREATE_FAILED]);
    }

    #[test]
    fn unparseable_fee_is_a_generic_failure() {
        let (controller, gateway, notifier) = setup(FakeGateway::default());
        fill_draft(&controller, "Logo", "desc", "one");

        block_on(controller.create_project());

        assert_eq!(gateway.gateway_calls(), 0);
        assert_eq!(notifier.messages(NoticeLevel::Error), vec![NOTICE_CREATE_FAILED]);
        assert!(!state(&controller).busy);
    }

    #[test]
    fn create_without_wallet_is_blocked() {
        let (controller, gateway, notifier) = setup(FakeGateway {
            missing_wallet: true,
            ..FakeGateway::default()
        });
        fill_draft(&controller, "Logo", "desc", "1.0");

        block_on(controller.create_project());

        assert_eq!(gateway.gateway_calls(), 0);
        assert_eq!(notifier.messages(NoticeLevel::Error), vec![NOTICE_WALLET_MISSING]);
        assert!(!state(&controller).busy);
    }

    #[test]
    fn busy_flag_blocks_resubmission() {
        let (controller, gateway, _) = setup(FakeGateway::default());
        fill_draft(&controller, "Logo", "desc", "1.0");
        controller.store().borrow_mut().busy = true;

        block_on(controller.create_project());

        assert_eq!(gateway.gateway_calls(), 0);
    }

    #[test]
    fn cancel_clears_draft_and_closes_modal() {
        let (controller, _, _) = setup(FakeGateway::default());
        fill_draft(&controller, "Logo", "desc", "1.0");

        controller.cancel_modal();

        let state = state(&controller);
        assert!(!state.show_modal);
        assert_eq!(state.draft, FormDraft::default());
    }

    #[test]
    fn removal_without_id_never_reaches_gateway() {
        let (controller, gateway, notifier) = setup(FakeGateway::default());

        block_on(controller.remove_project(None));

        assert_eq!(gateway.gateway_calls(), 0);
        assert_eq!(notifier.messages(NoticeLevel::Error), vec![NOTICE_INVALID_PROJECT_ID]);
        assert!(!state(&controller).busy);
    }

    #[test]
    fn removal_confirms_then_reloads_active_tab() {
        let gateway = FakeGateway::default();
        gateway.freelancer_projects.borrow_mut().push(raw(4, "Audit", 1));
        let (controller, gateway, notifier) = setup(gateway);
        controller.store().borrow_mut().active_tab = ProjectsTab::Freelancer;

        block_on(controller.remove_project(Some(4)));

        let calls = gateway.calls();
        assert_eq!(calls[0], Call::Remove(4));
        assert_eq!(calls[1], Call::Wait(TxHash("0xremove".to_string())));
        assert_eq!(calls[3], Call::ForFreelancer(ADDRESS.to_string()));
        assert_eq!(notifier.messages(NoticeLevel::Success), vec![NOTICE_PROJECT_REMOVED]);
        assert!(!state(&controller).busy);
    }

    #[test]
    fn failed_removal_clears_busy_and_keeps_stale_list() {
        let gateway = FakeGateway {
            fail_confirmation: true,
            ..FakeGateway::default()
        };
        gateway.owner_projects.borrow_mut().push(raw(4, "Logo", 0));
        let (controller, gateway, notifier) = setup(gateway);
        block_on(controller.load());

        block_on(controller.remove_project(Some(4)));

        let state = state(&controller);
        assert!(!state.busy);
        assert_eq!(state.client_projects[0].id, 4);
        assert_eq!(
            notifier.messages(NoticeLevel::Error),
            vec!["Error: Timed out waiting for transaction 0xremove".to_string()]
        );
        // no reload after the failure
        assert_eq!(gateway.calls().last(), Some(&Call::Wait(TxHash("0xremove".to_string()))));
    }

    #[test]
    fn removal_without_wallet_reports_error() {
        let (controller, gateway, notifier) = setup(FakeGateway {
            missing_wallet: true,
            ..FakeGateway::default()
        });

        block_on(controller.remove_project(Some(1)));

        assert_eq!(gateway.gateway_calls(), 0);
        assert_eq!(
            notifier.messages(NoticeLevel::Error),
            vec![format!("Error: {}", NOTICE_WALLET_MISSING)]
        );
        assert!(!state(&controller).busy);
    }
}
