//! Deterministic composition of the final report.
//!
//! Every section is built from session state. The one exception is the
//! conclusion, which the report stage asks the text-generation collaborator
//! to write; `fallback_conclusion` is the deterministic template used when
//! that call fails, built from the same values as the prompt.

use crate::domain::analysis::AnalysisResult;
use crate::domain::economics::{CalculationResult, SystemCalculation};
use crate::domain::profile::UserProfile;

/// Assembles the full report from the fixed sections plus the conclusion.
pub fn compose(
    profile: &UserProfile,
    analysis: &AnalysisResult,
    calculations: &CalculationResult,
    conclusion: &str,
) -> String {
    let mut report = String::new();

    report.push_str("# 🌱 PERSONALIZED ENERGY PLAN\n\n");
    report.push_str(&profile_summary(profile));
    report.push_str("\n---\n\n");

    report.push_str("## 📊 Analysis summary\n\n");
    report.push_str(&analysis_summary(analysis));

    report.push_str("\n## 💡 Our recommendations\n\n");
    report.push_str(&recommendations(calculations));

    report.push_str("\n## 💰 Economic analysis\n\n");
    report.push_str(&economics_table(calculations));

    report.push_str("\n## 📅 Implementation plan\n\n");
    report.push_str(implementation_timeline());

    report.push_str("\n## ✅ Conclusion\n\n");
    report.push_str(conclusion);
    report.push('\n');

    report
}

/// Header block naming the property the plan is for.
pub fn profile_summary(profile: &UserProfile) -> String {
    let address = profile.location.address.as_deref().unwrap_or("your location");
    let building = profile
        .building
        .building_type
        .map(|b| b.label())
        .unwrap_or("property");
    let mut summary = format!("**For:** {}\n**Building type:** {}\n", address, building);
    if let Some(area) = profile.building.heated_area_m2 {
        summary.push_str(&format!("**Heated area:** {:.0} m²\n", area));
    }
    summary
}

/// Per-technology potential with the score-band verdicts.
pub fn analysis_summary(analysis: &AnalysisResult) -> String {
    let mut summary =
        String::from("Your location has the following renewable energy potential:\n\n");

    let solar = &analysis.solar;
    if solar.score >= 70 {
        summary.push_str(&format!(
            "☀️ **Solar PV:** EXCELLENT potential ({}/100)\n   *{}*\n",
            solar.score, solar.reasoning
        ));
    } else if solar.score >= 50 {
        summary.push_str(&format!(
            "☀️ **Solar PV:** good potential ({}/100)\n",
            solar.score
        ));
    } else {
        summary.push_str(&format!(
            "☀️ **Solar PV:** limited potential ({}/100)\n",
            solar.score
        ));
    }
    summary.push('\n');

    let wind = &analysis.wind;
    if wind.score >= 60 {
        summary.push_str(&format!(
            "💨 **Wind energy:** suitable location ({}/100)\n   *{}*\n",
            wind.score, wind.reasoning
        ));
    } else {
        summary.push_str(&format!(
            "💨 **Wind energy:** unsuitable conditions ({}/100)\n",
            wind.score
        ));
    }
    summary.push('\n');

    let heat_pump = &analysis.heat_pump;
    if heat_pump.score >= 70 {
        summary.push_str(&format!(
            "🔥 **Heat pump:** RECOMMENDED ({}/100)\n   *{}*\n",
            heat_pump.score, heat_pump.reasoning
        ));
    } else {
        summary.push_str(&format!(
            "🔥 **Heat pump:** possible installation ({}/100)\n",
            heat_pump.score
        ));
    }

    summary
}

/// Best single system and, when worthwhile, the combined bundle.
pub fn recommendations(calculations: &CalculationResult) -> String {
    let mut text = String::new();

    if let Some(best) = calculations.best_single() {
        text.push_str(&format!(
            "### 🥇 Best single technology: **{}**\n\n",
            best.technology
        ));
        text.push_str(&format!("- System size: {}\n", best.size_descriptor));
        text.push_str(&format!(
            "- Investment: **{:.0} €**\n",
            best.installation_cost
        ));
        text.push_str(&format!(
            "- Yearly saving: **{:.0} €**\n",
            best.yearly_savings
        ));
        text.push_str(&format!("- Payback: **{}**\n", best.payback_text()));
    } else {
        text.push_str("None of the analysed systems pays for itself under the current assumptions.\n");
    }

    if let Some(combined) = &calculations.combined {
        if combined.roi_percent.is_some_and(|roi| roi > 0.0) {
            text.push_str(&format!(
                "\n### 🎯 Optimal combination: **{}**\n\n",
                combined.size_descriptor
            ));
            text.push_str("**Benefits of the combined solution:**\n");
            text.push_str("- Maximum energy independence\n");
            text.push_str("- Technology synergy (PV powers the heat pump)\n");
            text.push_str(&format!(
                "- Total investment: **{:.0} €**\n",
                combined.installation_cost
            ));
            text.push_str(&format!(
                "- Total yearly saving: **{:.0} €**\n",
                combined.yearly_savings
            ));
            text.push_str(&format!("- Payback: **{}**\n", combined.payback_text()));
        }
    }

    text
}

/// Markdown comparison table across all computed systems.
pub fn economics_table(calculations: &CalculationResult) -> String {
    let mut table = String::from("### 📈 Investment comparison\n\n");
    table.push_str("| Technology | Investment | Yearly saving | Payback | ROI |\n");
    table.push_str("|------------|------------|---------------|---------|-----|\n");

    for system in calculations.single_systems() {
        table.push_str(&table_row(system, false));
    }
    if let Some(combined) = &calculations.combined {
        table.push_str(&table_row(combined, true));
    }

    table
}

fn table_row(system: &SystemCalculation, emphasised: bool) -> String {
    let cells = [
        system.technology.label().to_string(),
        format!("{:.0} €", system.installation_cost),
        format!("{:.0} €", system.yearly_savings),
        system.payback_text(),
        system.roi_text(),
    ];
    if emphasised {
        format!(
            "| **{}** | **{}** | **{}** | **{}** | **{}** |\n",
            cells[0], cells[1], cells[2], cells[3], cells[4]
        )
    } else {
        format!(
            "| {} | {} | {} | {} | {} |\n",
            cells[0], cells[1], cells[2], cells[3], cells[4]
        )
    }
}

/// Fixed step-by-step rollout plan.
pub fn implementation_timeline() -> &'static str {
    "### Step by step to savings:\n\n\
     1. **Week 1-2:** Consultation and detailed design\n\
        - Site survey\n\
        - Exact measurements and calculations\n\
        - Final offer\n\n\
     2. **Week 3-4:** Administration\n\
        - Subsidy application\n\
        - Permits and approvals\n\
        - Component ordering\n\n\
     3. **Month 2:** Installation\n\
        - System assembly (2-5 days)\n\
        - Grid connection\n\
        - Testing and commissioning\n\n\
     4. **Month 3+:** Monitoring\n\
        - Performance tracking\n\
        - Optimization\n\
        - Service support\n"
}

/// Prompt for the AI-written conclusion.
pub fn conclusion_prompt(profile: &UserProfile, best: &SystemCalculation) -> String {
    format!(
        "Write a short, persuasive conclusion (3-4 sentences) for a client.\n\
         Location: {}\n\
         Building type: {}\n\
         Best solution: {}\n\
         Saving: {:.0} €/year\n\
         Payback: {}\n\n\
         Be positive and motivating. Emphasise both the ecological and the \
         economic benefit.",
        profile.location.address.as_deref().unwrap_or("unknown"),
        profile
            .building
            .building_type
            .map(|b| b.label())
            .unwrap_or("property"),
        best.technology,
        best.yearly_savings,
        best.payback_text(),
    )
}

/// Deterministic conclusion used when the collaborator call fails.
pub fn fallback_conclusion(profile: &UserProfile, best: &SystemCalculation) -> String {
    format!(
        "For your property in {} we identified a strong energy-saving \
         potential. A {} will bring a yearly saving of {:.0} € with a payback \
         of {}. Beyond the economics you will significantly cut your carbon \
         footprint and contribute to protecting the environment. **Start \
         saving today!**",
        profile.location.address.as_deref().unwrap_or("your area"),
        best.technology,
        best.yearly_savings,
        best.payback_text(),
    )
}

/// Conclusion used when no system could be computed at all.
pub fn empty_conclusion() -> &'static str {
    "Based on the collected data none of the analysed systems is economical \
     under the current assumptions. We recommend improving the building's \
     insulation first and revisiting the analysis afterwards."
}
