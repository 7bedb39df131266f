//! Diet plan reader for nutriplan.
//!
//! Turns free-form Arabic diet plan text into a [`DietPlan`]. Parsing runs
//! in two passes: [`normalize`] puts every recognized keyword at the start
//! of its own line, then a single forward pass classifies each line as a
//! meal title, a macro label or content.
//!
//! Parsing never fails. Text that cannot be placed is reported through the
//! warnings on [`ConversionResult`].

mod classify;
pub mod keywords;
mod normalize;

use nutriplan_core::{ConversionResult, DietPlan};

pub use keywords::{DEFAULT_ICON, MACRO_KEYWORDS, MEAL_TITLES, TitleKeyword};
pub use normalize::normalize;

/// A complete plan in the format the reader expects.
pub const SAMPLE_PLAN: &str = "وجبة الإفطار 3 بيضات مسلوقة + رغيف بلدي + خيار
وجبة خفيفة ثمرة تفاح + قهوة
الغداء 200جم صدور دجاج + 5 ملاعق أرز + سلطة
وجبة قبل التمرين موزة + قهوة
وجبة بعد التمرين علبة تونة + رغيف سن
العشاء جبنة قريش + طماطم
ملاحظات عامة عاش يا بطل، النظام ده هيساعدك تنشف وفي نفس الوقت تشبع، أهم حاجة الالتزام بالمواعيد.
سعرات
2000
بروتين
180
كارب
150
دهون
60";

/// Parse diet plan text.
pub fn parse(input: &str) -> DietPlan {
    parse_with_report(input).value
}

/// Parse diet plan text, keeping notes about dropped lines and macro
/// labels without a value.
pub fn parse_with_report(input: &str) -> ConversionResult<DietPlan> {
    classify::parse_lines(&normalize(input))
}
