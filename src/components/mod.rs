//! UI Components
//!
//! Shell pieces (header, hub selector, module grid) and one component per
//! dashboard section.

mod attendance_section;
mod contacts_section;
mod delete_confirm_button;
mod delivery_section;
mod fleet_section;
mod header_bar;
mod hub_selector;
mod incidents_section;
mod kilos_litros_section;
mod module_grid;
mod month_picker;
mod notification_panel;
mod purchases_section;
mod section_header;
mod settlement_section;

pub use attendance_section::AttendanceSection;
pub use contacts_section::ContactsSection;
pub use delete_confirm_button::DeleteConfirmButton;
pub use delivery_section::DeliverySection;
pub use fleet_section::FleetSection;
pub use header_bar::HeaderBar;
pub use hub_selector::HubSelector;
pub use incidents_section::IncidentsSection;
pub use kilos_litros_section::KilosLitrosSection;
pub use module_grid::ModuleGrid;
pub use month_picker::{picked_period, MonthPicker};
pub use notification_panel::NotificationPanel;
pub use purchases_section::PurchasesSection;
pub use section_header::{ErrorBanner, SectionHeader};
pub use settlement_section::SettlementSection;
