//! Drains reducer-emitted [`RuntimeEffect`](crate::RuntimeEffect) values in order.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

pub(crate) fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }
        // Cleared first so effects queued by nested dispatches land in a fresh batch.
        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in queued {
            host.run_runtime_effect(runtime, effect);
        }
    });
}
