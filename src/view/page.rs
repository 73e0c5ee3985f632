//! Server-rendered settings page

use std::fmt::Write;

use crate::domain::{RewardCategory, RewardType};
use crate::view::form::SettingsForm;

struct PanelCopy {
    heading: &'static str,
    description: &'static str,
    type_heading: &'static str,
    /// Value label for (percentage, fixed)
    value_label: (&'static str, &'static str),
    /// Help text for (percentage, fixed)
    help: (&'static str, &'static str),
}

fn panel_copy(category: RewardCategory) -> PanelCopy {
    match category {
        RewardCategory::Affiliate => PanelCopy {
            heading: "Affiliate Rewards",
            description: "Set commission for affiliates when their referrals make a purchase",
            type_heading: "Reward Type",
            value_label: ("Commission Percentage", "Commission Amount"),
            help: (
                "Affiliates earn this percentage of each sale",
                "Affiliates earn this fixed amount per sale",
            ),
        },
        RewardCategory::Customer => PanelCopy {
            heading: "Customer Rewards",
            description: "Set discount for customers who use an affiliate link",
            type_heading: "Reward Type",
            value_label: ("Discount Percentage", "Discount Amount"),
            help: (
                "Customers get this percentage off their order",
                "Customers get this fixed amount off their order",
            ),
        },
        RewardCategory::NextOrder => PanelCopy {
            heading: "Next Order Discount",
            description: "Automatically create a discount coupon for customers after their order (only if they didn't use a coupon)",
            type_heading: "Discount Type",
            value_label: ("Discount Percentage", "Discount Amount"),
            help: (
                "Single-use coupon created automatically for next purchase",
                "Single-use coupon created automatically for next purchase",
            ),
        },
    }
}

fn pick(reward_type: RewardType, pair: (&'static str, &'static str)) -> &'static str {
    match reward_type {
        RewardType::Percentage => pair.0,
        RewardType::Fixed => pair.1,
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_panel(out: &mut String, form: &SettingsForm, category: RewardCategory) {
    let copy = panel_copy(category);
    let draft = form.draft(category);
    let type_key = category.type_key();

    let _ = write!(
        out,
        r#"<section class="panel" id="{type_key}-panel">
<h2>{heading}</h2>
<p>{description}</p>
<fieldset>
<legend>{type_heading}</legend>
"#,
        heading = copy.heading,
        description = escape_html(copy.description),
        type_heading = copy.type_heading,
    );

    for (reward_type, label) in [
        (RewardType::Percentage, "Percentage"),
        (RewardType::Fixed, "Fixed Amount"),
    ] {
        let selected = draft.reward_type == reward_type;
        let _ = writeln!(
            out,
            r#"<label class="{variant}"><input type="radio" name="{type_key}" value="{value}"{checked}> {label}</label>"#,
            variant = if selected { "primary" } else { "secondary" },
            value = reward_type,
            checked = if selected { " checked" } else { "" },
        );
    }

    let suffix = match draft.reward_type {
        RewardType::Percentage => "%",
        RewardType::Fixed => "$",
    };

    let _ = write!(
        out,
        r#"</fieldset>
<label for="{value_key}">{value_label}</label>
<input type="number" step="any" id="{value_key}" name="{value_key}" value="{value}"> <span class="suffix">{suffix}</span>
<p class="subdued">{help}</p>
</section>
"#,
        value_key = category.value_key(),
        value_label = pick(draft.reward_type, copy.value_label),
        value = escape_html(&draft.value),
        help = pick(draft.reward_type, copy.help),
    );
}

/// Full HTML document for the current form state
pub fn render_settings_page(form: &SettingsForm) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Affiliate Settings</title>
</head>
<body>
<main class="page" data-shop="{shop}">
<h1>Affiliate Settings</h1>
<form method="post">
"#,
        shop = escape_html(form.shop()),
    );

    if form.is_submitting() {
        out.push_str(
            "<button type=\"submit\" class=\"primary-action\" disabled aria-busy=\"true\">Saving...</button>\n",
        );
    } else {
        out.push_str("<button type=\"submit\" class=\"primary-action\">Save Settings</button>\n");
    }

    for category in RewardCategory::ALL {
        render_panel(&mut out, form, category);
    }

    out.push_str("</form>\n<aside class=\"panel\">\n<h2>Rewards Preview</h2>\n");
    for line in form.preview() {
        let _ = writeln!(
            out,
            "<p><strong>{}</strong>{}</p>",
            line.label,
            escape_html(&line.text)
        );
    }
    out.push_str("</aside>\n</main>\n</body>\n</html>\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RewardSettings, SettingsView};

    fn form() -> SettingsForm {
        SettingsForm::from_view_model(&SettingsView {
            shop: "shop1.myshopify.com".into(),
            settings: RewardSettings::defaults_for("shop1.myshopify.com"),
        })
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_renders_three_panels_and_preview() {
        let html = render_settings_page(&form());

        assert!(html.contains("<h2>Affiliate Rewards</h2>"));
        assert!(html.contains("<h2>Customer Rewards</h2>"));
        assert!(html.contains("<h2>Next Order Discount</h2>"));
        assert!(html.contains("<h2>Rewards Preview</h2>"));
        assert!(html.contains("<strong>Affiliates earn: </strong>10% per sale"));
        assert!(html.contains(r#"name="affiliate_reward_value" value="10""#));
        assert!(html.contains(
            r#"name="customer_reward_type" value="percentage" checked"#
        ));
        assert!(html.contains("Save Settings"));
    }

    #[test]
    fn test_fixed_type_switches_copy_and_suffix() {
        let mut form = form();
        form.select_type(RewardCategory::Affiliate, RewardType::Fixed);
        form.set_value(RewardCategory::Affiliate, "25");
        let html = render_settings_page(&form);

        assert!(html.contains("Commission Amount"));
        assert!(html.contains("Affiliates earn this fixed amount per sale"));
        assert!(html.contains("<strong>Affiliates earn: </strong>$25 per sale"));
        assert!(html.contains(r#"name="affiliate_reward_type" value="fixed" checked"#));
    }

    #[test]
    fn test_submitting_disables_save() {
        let mut form = form();
        form.begin_save();
        let html = render_settings_page(&form);
        assert!(html.contains("disabled aria-busy=\"true\""));
        assert!(!html.contains("Save Settings</button>"));
    }

    #[test]
    fn test_value_text_is_escaped() {
        let mut form = form();
        form.set_value(RewardCategory::Customer, "\"><script>");
        let html = render_settings_page(&form);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }
}
