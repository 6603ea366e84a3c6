pub struct Icons;

impl Icons {
    pub const FUEL: &str = "⛽";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const CHART: &str = "📈";
    pub const NEW: &str = "✨";
    pub const MOD: &str = "📝";
    pub const DEL: &str = "🗑️";
    pub const DATABASE: &str = "🗄️";
    pub const SAVE: &str = "💾";
    pub const SORT: &str = "🔃";
    pub const GEAR: &str = "⚙️";
    pub const WAVE: &str = "👋";
}
