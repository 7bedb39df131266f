//! Built-in print stylesheet.

/// A4 pages, right-to-left, one page per sheet.
pub const DEFAULT_STYLESHEET: &str = r#"@page { size: A4; margin: 0; }
* { box-sizing: border-box; }
body { margin: 0; direction: rtl; font-family: "Cairo", "Tajawal", "Segoe UI", sans-serif; color: #1f2933; }
.page { width: 210mm; height: 297mm; padding: 18mm 16mm; overflow: hidden; position: relative; page-break-after: always; break-after: page; background-color: #ffffff; background-size: cover; background-position: center; }
.page:last-child { page-break-after: auto; break-after: auto; }
h1, h2, h3, h4 { margin: 0 0 0.5em; }

.notes-page h1 { font-size: 30px; text-align: center; margin-bottom: 24px; }
.notes-content { font-size: 20px; line-height: 2; background: rgba(255, 255, 255, 0.85); border-radius: 16px; padding: 24px; }

.diet-header { text-align: center; margin-bottom: 20px; }
.diet-header h2 { font-size: 30px; }
.diet-header h3 { font-size: 16px; font-weight: 400; color: #52606d; direction: ltr; }
.meals-container { display: flex; flex-direction: column; gap: 12px; }
.meal-card { background: rgba(255, 255, 255, 0.9); border-radius: 14px; padding: 12px 16px; border-right: 5px solid #3ebd93; }
.meal-card h4 { font-size: 18px; margin-bottom: 6px; }
.meal-content { font-size: 16px; line-height: 1.8; }
.macros-container { display: flex; justify-content: space-between; gap: 10px; margin-top: 20px; }
.macro-stat { flex: 1; text-align: center; background: #1f2933; color: #ffffff; border-radius: 14px; padding: 10px 4px; }
.macro-stat .label { display: block; font-size: 14px; opacity: 0.8; }
.macro-stat .value { display: block; font-size: 26px; font-weight: 700; }
.macro-stat .unit { font-size: 12px; opacity: 0.8; }

.ba-content { display: flex; flex-direction: column; align-items: center; height: 100%; }
.ba-client-name { font-size: 32px; margin-bottom: 24px; }
.ba-images-row { display: flex; gap: 16px; width: 100%; }
.ba-image-box { flex: 1; text-align: center; }
.ba-image-box img, .ba-placeholder { width: 100%; height: 130mm; object-fit: cover; border-radius: 16px; }
.ba-placeholder { display: flex; align-items: center; justify-content: center; background: #e4e7eb; color: #9aa5b1; font-size: 28px; }
.ba-label { font-size: 20px; font-weight: 700; margin-top: 10px; }
.ba-notes-section { width: 100%; margin-top: 24px; }
.ba-notes-box { font-size: 18px; line-height: 1.9; background: rgba(255, 255, 255, 0.85); border-radius: 14px; padding: 16px; }
"#;
