use gdbkit_core::convert::DocumentOutcome;
use gdbkit_core::inventory::InventoryObserver;
use gdbkit_core::models::InventoryRecord;
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{msg}\n[{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}";

/// Create a progress bar for determinate progress; hidden when `hidden`
pub fn create_progress_bar(total: u64, message: &str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb.set_message(message.to_string());
    pb
}

/// Finish a progress bar with success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

/// Progress over the documents of a conversion batch
pub struct ConvertProgress {
    bar: ProgressBar,
}

impl ConvertProgress {
    pub fn new(documents: usize, hidden: bool) -> Self {
        Self {
            bar: create_progress_bar(documents as u64, "Importing legacy documents", hidden),
        }
    }

    pub fn document_done(&self, outcome: &DocumentOutcome) {
        self.bar.set_message(outcome.layout.after.clone());
        self.bar.inc(1);
    }

    pub fn finish(&self, documents: usize) {
        finish_success(&self.bar, &format!("Imported {} documents", documents));
    }
}

/// Progress over the items of each geodatabase in an inventory
pub struct InventoryProgress {
    bar: ProgressBar,
    hidden: bool,
    geodatabases: usize,
}

impl InventoryProgress {
    pub fn new(hidden: bool) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            hidden,
            geodatabases: 0,
        }
    }

    pub fn finish(&self, items: usize) {
        finish_success(
            &self.bar,
            &format!("Described {} items across {} geodatabases", items, self.geodatabases),
        );
    }
}

impl InventoryObserver for InventoryProgress {
    fn geodatabase_started(&mut self, gdb_path: &str, item_count: usize) {
        self.bar.finish_and_clear();
        self.geodatabases += 1;
        self.bar = create_progress_bar(item_count as u64, gdb_path, self.hidden);
    }

    fn item_done(&mut self, _record: &InventoryRecord) {
        self.bar.inc(1);
    }
}
