//! # vaultscan-checks — Content-Package Validation Rules
//!
//! The domain rule sets that run on the `vaultscan-core` engine:
//!
//! - **Clientlibs** (`clientlibs.rs`): client library folders must opt into
//!   proxying and pin an approved JavaScript processor configuration.
//!
//! - **ComponentGroups** (`component_groups.rs`): authorable components
//!   must declare a component group drawn from the configured allow-lists,
//!   with a stricter list for form components.
//!
//! - **TemplatePolicies** (`template_policies.rs`): editable templates must
//!   keep their policy mappings consistent — every policy reference
//!   resolves, and every empty layout container is mapped to a policy that
//!   declares its allowed components.
//!
//! All three rules are configurable over their path prefixes and group
//! sets; the defaults follow the classic-app repository conventions the
//! rules were originally written for.

pub mod clientlibs;
pub mod component_groups;
pub mod template_policies;

pub use clientlibs::Clientlibs;
pub use component_groups::ComponentGroups;
pub use template_policies::TemplatePolicies;
