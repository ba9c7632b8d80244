use crate::mvu::dashboard::dashboard_effects::{Deps, run_effect};
use crate::mvu::dashboard::{DashboardModel, Msg, update};

/// Runs the MVU loop for the dashboard model: seeds with `init_msg` and drains effects.
/// Failures end up in `model.error`, never in the return value.
pub async fn run_dashboard(model: &mut DashboardModel, init_msg: Msg, deps: Deps<'_>) {
    let mut effects = update(model, init_msg);
    while let Some(effect) = effects.pop() {
        let msg = run_effect(effect, deps).await;
        effects.extend(update(model, msg));
    }
}
