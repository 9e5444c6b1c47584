// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Run outputs that live on disk:
//
//   config_store.rs — Saves/loads the resolved SampleConfig as
//                     JSON so a run can be replayed.
//
//   pair_log.rs     — Writes one CSV row per sampled pair batch
//                     (anchor, class, positive/negative counts).
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// JSON config persistence
pub mod config_store;

/// Pair batch CSV logger
pub mod pair_log;
