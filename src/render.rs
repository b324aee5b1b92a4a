//! Plain-text rendering of the app view.

use chrono::NaiveDate;
use obgyn_core::AppView;
use obgyn_core::constants::EMPTY_PLACEHOLDER;
use obgyn_core::directory::DirectoryView;
use obgyn_core::editors::anc::{AncCaseView, AncSection, AncTab, AncView};
use obgyn_core::editors::gyne::GyneView;
use obgyn_core::shell::{DetailsView, SectionView, ShellView, SidebarView};
use obgyn_records::{GyneVisit, PastPregnancy, PatientProfile};
use std::fmt::Write;

fn date(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| EMPTY_PLACEHOLDER.to_string(), |d| d.to_string())
}

fn text(value: &str) -> &str {
    if value.trim().is_empty() {
        EMPTY_PLACEHOLDER
    } else {
        value
    }
}

fn number(value: f64) -> String {
    if value > 0.0 {
        format!("{value}")
    } else {
        EMPTY_PLACEHOLDER.to_string()
    }
}

pub fn render(view: &AppView) -> String {
    let mut out = String::new();
    match view {
        AppView::Directory(directory) => render_directory(&mut out, directory),
        AppView::Patient(shell) => render_shell(&mut out, shell),
    }
    out
}

fn render_directory(out: &mut String, view: &DirectoryView) {
    let facets: Vec<String> = view
        .facets
        .iter()
        .map(|(facet, count)| {
            let marker = if *facet == view.status { "*" } else { "" };
            format!("{marker}{facet} ({count})")
        })
        .collect();
    let _ = writeln!(out, "== Patients == search: '{}'", view.query);
    let _ = writeln!(out, "{}", facets.join("  "));

    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "! {notice}");
    }
    if view.is_empty() {
        let _ = writeln!(out, "No patients match.");
    }
    for row in &view.rows {
        let weeks = row
            .weeks_pregnant
            .map_or_else(|| EMPTY_PLACEHOLDER.to_string(), |w| format!("{w}w"));
        let _ = writeln!(
            out,
            "[{}] {:<12} {:<18} {}F {:<4} {:<10} GA {:<4} EDD {:<10} next {:<10} {}{}",
            row.initial,
            row.uhid,
            row.name,
            row.age,
            row.blood_group,
            row.mobile,
            weeks,
            date(row.edd),
            date(row.next_visit),
            row.status.as_str(),
            if row.high_risk { " HIGH RISK" } else { "" },
        );
    }
    let _ = writeln!(out, "{} of {} patients", view.rows.len(), view.total);
}

fn render_shell(out: &mut String, view: &ShellView) {
    render_sidebar(out, &view.sidebar);
    let _ = writeln!(out, "---- {} ----", view.section);
    match &view.body {
        SectionView::Details(details) => render_details(out, details),
        SectionView::Anc(anc) => render_anc(out, anc),
        SectionView::MedicalHistory(history) => {
            let _ = writeln!(out, "editing: {}", history.editing);
            if history.positives.is_empty() {
                let _ = writeln!(out, "nothing ticked");
            }
            for positive in &history.positives {
                let _ = writeln!(out, "  [x] {positive}");
            }
        }
        SectionView::ObstetricHistory(history) => {
            let _ = writeln!(out, "editing: {}", history.editing);
            render_past_pregnancies(out, &history.entries);
        }
        SectionView::Gynecology(gyne) => render_gyne(out, gyne),
        SectionView::General(log) => {
            for visit in &log.visits {
                let _ = writeln!(
                    out,
                    "  {} {} {} BP {} wt {} : {}",
                    visit.id,
                    visit.date,
                    visit.template.as_str(),
                    visit
                        .blood_pressure()
                        .unwrap_or_else(|| EMPTY_PLACEHOLDER.to_string()),
                    visit
                        .weight
                        .map_or_else(|| EMPTY_PLACEHOLDER.to_string(), |w| w.to_string()),
                    text(&visit.complaints),
                );
            }
            let counts: Vec<String> = log
                .counts
                .iter()
                .map(|(template, count)| format!("{} {count}", template.as_str()))
                .collect();
            let _ = writeln!(out, "{}", counts.join(", "));
        }
    }
}

fn render_sidebar(out: &mut String, sidebar: &SidebarView) {
    let _ = writeln!(
        out,
        "({}) {} {} {}F {} {}{}",
        sidebar.initials,
        sidebar.name,
        sidebar.uhid,
        sidebar.age,
        sidebar.blood_group,
        sidebar.gpla,
        if sidebar.high_risk { " HIGH RISK" } else { "" },
    );
    let _ = writeln!(out, "EDD {}", date(sidebar.edd));
    if let Some(more) = &sidebar.more_details {
        let _ = writeln!(
            out,
            "  spouse {} | LMP {} | cycle {:?} | allergies {} | meds {}",
            text(&more.spouse_name),
            date(more.lmp),
            more.menstrual_cycle,
            if more.allergies.is_empty() {
                EMPTY_PLACEHOLDER.to_string()
            } else {
                more.allergies.join(", ")
            },
            text(&more.present_medication),
        );
    }
    let menu: Vec<String> = sidebar
        .menu
        .iter()
        .map(|item| {
            let marker = if item.active { ">" } else { " " };
            match item.count {
                Some(count) if count > 0 => format!("{marker}{} ({count})", item.label),
                _ => format!("{marker}{}", item.label),
            }
        })
        .collect();
    let _ = writeln!(out, "{}", menu.join(" |"));
}

fn render_profile(out: &mut String, profile: &PatientProfile) {
    let _ = writeln!(
        out,
        "  {} ({}), {}F, DOB {}, {}",
        profile.name,
        profile.uhid,
        profile.age,
        date(profile.dob),
        text(&profile.occupation)
    );
    let _ = writeln!(
        out,
        "  W/O {} ({}), {}, mobile {}",
        text(&profile.spouse_name),
        text(&profile.spouse_occupation),
        text(&profile.address),
        profile.mobile
    );
}

fn render_details(out: &mut String, details: &DetailsView) {
    render_profile(out, &details.profile.profile);
    if let Some(draft) = &details.profile.draft {
        let _ = writeln!(out, "  editing profile:");
        render_profile(out, draft);
    }
    let history = &details.obstetric_history;
    let _ = writeln!(
        out,
        "  {} | LMP {} | EDD {} | scan EDD {}",
        history.gpla_badge(),
        date(history.lmp),
        date(history.edd),
        date(history.scan_edd)
    );
    for factor in &history.risk_factors {
        let _ = writeln!(out, "  risk: {factor}");
    }
    for (label, items) in [
        ("medical", &details.medical_conditions),
        ("family", &details.family_conditions),
        ("personal", &details.personal_conditions),
    ] {
        if !items.is_empty() {
            let _ = writeln!(out, "  {label}: {}", items.join(", "));
        }
    }
    let labs: Vec<String> = details
        .lab_values
        .iter()
        .map(|(name, value)| format!("{name} {value}"))
        .collect();
    if !labs.is_empty() {
        let _ = writeln!(out, "  labs: {}", labs.join(", "));
    }
    let _ = writeln!(out, "  medication: {}", text(&details.present_medication));
}

fn render_past_pregnancies(out: &mut String, entries: &[PastPregnancy]) {
    if entries.is_empty() {
        let _ = writeln!(out, "  no past pregnancies");
    }
    for entry in entries {
        let _ = writeln!(
            out,
            "  #{} {} {} | {} | {} | {}",
            entry.pregnancy_number,
            entry.id,
            text(&entry.year),
            text(&entry.antenatal_course),
            text(&entry.mode_of_delivery),
            text(&entry.remarks),
        );
    }
}

fn render_anc(out: &mut String, view: &AncView) {
    match view {
        AncView::Empty { patient_name } => {
            let _ = writeln!(out, "No ANC case for {patient_name}. Type 'anc new' to start one.");
        }
        AncView::Case(case) => render_anc_case(out, case),
    }
}

fn render_anc_case(out: &mut String, view: &AncCaseView) {
    let case = &view.case;
    let status = &case.obstetric_status;
    let _ = writeln!(
        out,
        "case {} for {} | {} | EDD {} | GA {}",
        case.id,
        case.patient_name,
        if view.editing { "editing" } else { "saved" },
        date(view.edd),
        view.gestational_age
            .map_or_else(|| EMPTY_PLACEHOLDER.to_string(), |age| age.to_string()),
    );
    let tabs: Vec<String> = AncTab::ALL
        .iter()
        .map(|tab| {
            let marker = if *tab == view.tab { ">" } else { " " };
            format!("{marker}{}", tab.label())
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" |"));

    match view.tab {
        AncTab::Booking => {
            for (section, expanded) in &view.sections {
                let _ = writeln!(out, "[{}] {}", if *expanded { "-" } else { "+" }, section.title());
                if !*expanded {
                    continue;
                }
                match section {
                    AncSection::Obstetric => {
                        let _ = writeln!(
                            out,
                            "  G{} P{} L{} A{} | LMP {} | EDD {} | scan EDD {}",
                            status.gravida,
                            status.para,
                            status.living,
                            status.abortions,
                            date(status.lmp),
                            date(status.edd),
                            date(status.scan_edd)
                        );
                        let _ = writeln!(out, "  risk factors: {}", text(&status.risk_factors));
                    }
                    AncSection::PastOb => render_past_pregnancies(out, &case.past_obstetric_history),
                    AncSection::Medical => {
                        let _ = writeln!(out, "  surgery: {}", text(&case.past_history.surgery));
                    }
                    AncSection::Baseline => {
                        let tests = &case.baseline_tests;
                        let _ = writeln!(
                            out,
                            "  Hb {} | PCV {} | TSH {} | HIV {} | HBsAg {} | VDRL {}",
                            text(&tests.hb),
                            text(&tests.pcv),
                            text(&tests.tsh),
                            text(&tests.hiv),
                            text(&tests.hbs_ag),
                            text(&tests.vdrl)
                        );
                    }
                    AncSection::Usg => {
                        let usg = &case.usg_tracking;
                        let _ = writeln!(
                            out,
                            "  dating {} | NT {} | anomaly {}",
                            date(usg.dating_scan_date),
                            date(usg.combined_screening_date),
                            date(usg.anomaly_scan_date)
                        );
                    }
                    AncSection::Vaccines => {
                        let vaccines = &case.vaccinations;
                        let _ = writeln!(
                            out,
                            "  Td {} | Tdap {} | ICT {} | anti-D {}",
                            date(vaccines.td_vaccine_date),
                            date(vaccines.tdap_vaccine_date),
                            date(vaccines.ict_date),
                            date(vaccines.anti_d_date)
                        );
                    }
                    AncSection::Booking => {
                        let booking = &case.booking_visit;
                        let _ = writeln!(
                            out,
                            "  booked {} | height {} | weight {} | BMI {}",
                            date(booking.booking_date),
                            number(booking.height),
                            number(booking.weight),
                            number(booking.bmi)
                        );
                    }
                }
            }
        }
        AncTab::FollowUp => {
            if case.follow_up_visits.is_empty() {
                let _ = writeln!(out, "  no follow-up visits");
            }
            for visit in case.follow_up_visits.iter() {
                let _ = writeln!(
                    out,
                    "  {} {} {}w | wt {} | BP {}/{} | {} | next {}",
                    visit.id,
                    date(visit.date),
                    visit.weeks_by_lmp,
                    number(visit.weight),
                    visit.bp_systolic,
                    visit.bp_diastolic,
                    text(&visit.complaints),
                    date(visit.next_visit_date)
                );
            }
        }
        AncTab::Investigations => {
            for test in case.follow_up_tests.iter() {
                let _ = writeln!(
                    out,
                    "  {} {} {} | Hb {} | GTT {} | TSH {}",
                    test.id,
                    date(test.date),
                    text(&test.period),
                    text(&test.hb),
                    text(&test.gtt),
                    text(&test.tsh)
                );
            }
            if case.follow_up_tests.is_empty() {
                let _ = writeln!(out, "  no follow-up tests");
            }
        }
        AncTab::Delivery => {
            let outcome = &case.delivery_outcome;
            let _ = writeln!(
                out,
                "  delivered {} | {} | {} | {}",
                date(outcome.date_of_delivery),
                text(&outcome.mode_of_delivery),
                text(&outcome.sex_of_baby),
                text(&outcome.birth_weight)
            );
            let _ = writeln!(
                out,
                "  postnatal checkup {}",
                date(case.postnatal_care.next_checkup_date)
            );
        }
    }
}

fn render_gyne_visit(out: &mut String, visit: &GyneVisit) {
    let exam = &visit.physical_exam;
    let _ = writeln!(
        out,
        "  {} {} | {} | ht {} wt {} BMI {} | impression {} | advice {}",
        visit.id,
        visit.date,
        text(&visit.presenting_complaints),
        number(exam.height),
        number(exam.weight),
        number(exam.bmi),
        text(&visit.impression),
        text(&visit.advice)
    );
}

fn render_gyne(out: &mut String, view: &GyneView) {
    if view.visits.is_empty() {
        let _ = writeln!(out, "no saved gynecology visits");
    }
    for row in &view.visits {
        let _ = writeln!(
            out,
            "  {} {} | {} | {}",
            row.id,
            row.date,
            text(&row.presenting_complaints),
            text(&row.impression)
        );
    }
    if let Some(draft) = &view.draft {
        let _ = writeln!(out, "editing:");
        render_gyne_visit(out, draft);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obgyn_core::{App, AppAction, Component, Context, InMemoryStore};
    use std::sync::Arc;

    fn ctx() -> Context {
        let today = NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date");
        let config = obgyn_core::CoreConfig::new(
            obgyn_core::StoreSource::Bundled,
            obgyn_core::IdStrategy::Sequential,
        )
        .expect("config");
        Context::from_config(&config, today)
    }

    #[test]
    fn directory_lists_every_patient() {
        let ctx = ctx();
        let app = App::new(Arc::new(InMemoryStore::bundled().expect("store")), &ctx);
        let text = render(&app.view());
        assert!(text.contains("Priya Sharma"));
        assert!(text.contains("7 of 7 patients"));
    }

    #[test]
    fn notice_is_rendered() {
        let mut ctx = ctx();
        let app = App::new(Arc::new(InMemoryStore::bundled().expect("store")), &ctx)
            .reduce(AppAction::Select("WMN-2025-003".into()), &mut ctx)
            .expect("select");
        assert!(render(&app.view()).contains("! Patient WMN-2025-003 data not available"));
    }

    #[test]
    fn patient_screen_shows_sidebar() {
        let mut ctx = ctx();
        let app = App::new(Arc::new(InMemoryStore::bundled().expect("store")), &ctx)
            .reduce(AppAction::Select("WMN-2025-001".into()), &mut ctx)
            .expect("select");
        let text = render(&app.view());
        assert!(text.contains("(C) Chaitra WMN-2025-001"));
        assert!(text.contains("G4 P0 L0 A3 HIGH RISK"));
        assert!(text.contains(">Patient Details"));
    }
}
