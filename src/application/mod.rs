// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
//
//   prepare_use_case — load, normalise, encode and split CIFAR-10
//   stats_use_case   — describe the prepared splits
//   sample_use_case  — draw pair batches from one split and
//                      record them
//
// Rules for this layer:
//   - No array math here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

pub mod prepare_use_case;

pub mod stats_use_case;

pub mod sample_use_case;
