//! Built-in personal plan
//!
//! The default week rendered when no plan file is given: French activity
//! names, pastel colors and the author's own constraint notes.

use crate::{Color, Day, Occurrence, Plan};

pub const TITLE: &str = "Planning Personnel";

pub const FREE_TIME: &str = "Temps libre";

const DAY_NAMES: [&str; 7] = [
    "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
];

const LEGEND_TITLE: &str = "Activités, fréquences, contraintes et temps total:";

const CATALOG: [(&str, u32); 12] = [
    ("Petit déjeuner", 0xFFE5B4),
    ("Salle de sport", 0xE6FFE6),
    ("Douche", 0xFFD1DC),
    ("Travail", 0xFFB3BA),
    ("Courses", 0xFFCCCC),
    ("Déjeuner", 0xD7BDE2),
    ("Dîner", 0xD5D8DC),
    ("Sommeil", 0xB3E0FF),
    ("Ménage", 0xC5E1A5),
    ("Cuisine", 0xF9E79F),
    ("Réunion familiale", 0xABEBC6),
    ("Réunion amis", 0xFAD7A0),
];

const LEGEND: [(&str, &str); 13] = [
    ("Petit déjeuner", "Quotidien, matin, 30 min (7h en semaine, 10h le weekend)"),
    ("Salle de sport", "5 fois par semaine, matin, 2h"),
    ("Douche", "Quotidienne, matin, 30 min (à la salle de sport ou à la maison)"),
    ("Travail", "2 x 4h quotidiennes du lundi au vendredi, commence à 11h"),
    ("Courses", "2 fois par semaine, 1h30, matin avant le travail"),
    ("Déjeuner", "Quotidien, 1h, commence à 12h30 (14h le samedi, 13h30 le dimanche)"),
    ("Dîner", "Quotidien, 1h"),
    ("Sommeil", "9h par nuit (jusqu'à 10h le weekend)"),
    ("Ménage", "3h / semaine, samedi matin avant le Déjeuner"),
    ("Cuisine", "4h / semaine, dimanche matin avant le Déjeuner"),
    ("Réunion familiale", "1h30 / semaine, dimanche à 20h"),
    ("Réunion amis", "3h / semaine, vendredi soir"),
    (FREE_TIME, "Plages de temps non affectées"),
];

/// The default personal week
pub fn personal_plan() -> Plan {
    let mut plan = Plan::new(TITLE)
        .free_time(FREE_TIME, Color::WHITE)
        .legend_title(LEGEND_TITLE)
        .day_names(DAY_NAMES);

    for (name, rgb) in CATALOG {
        plan = plan.activity(name, Color::rgb(rgb));
    }

    // Declaration order matters: later occurrences win on shared cells
    plan.occurrences = vec![
        Occurrence::new("Sommeil").slots(18).on(Day::weekdays()).at("22:00"),
        Occurrence::new("Sommeil").slots(23).on(Day::weekend()).at("22:00").label("weekend"),
        Occurrence::new("Petit déjeuner").slots(1).on(Day::weekdays()).at("07:00"),
        Occurrence::new("Petit déjeuner").slots(1).on(Day::weekend()).at("09:30").label("weekend"),
        Occurrence::new("Salle de sport").slots(4).on(Day::weekdays()).at("07:30"),
        Occurrence::new("Douche").slots(1).on(Day::weekdays()).at("09:30"),
        Occurrence::new("Courses").slots(3).on([Day::TUESDAY, Day::FRIDAY]).at("10:00"),
        Occurrence::new("Travail").slots(16).on(Day::weekdays()).at("11:00"),
        Occurrence::new("Déjeuner").slots(2).on(Day::weekdays()).at("12:30"),
        Occurrence::new("Déjeuner").slots(2).on(Day::weekend()).at("12:30").label("weekend"),
        Occurrence::new("Dîner").slots(2).on(Day::every_day()).at("19:00"),
        Occurrence::new("Ménage").slots(4).on([Day::SATURDAY]).at("10:00"),
        Occurrence::new("Douche").slots(1).on(Day::weekend()).at("12:00").label("weekend"),
        Occurrence::new("Cuisine").slots(4).on([Day::SUNDAY]).at("10:00"),
        Occurrence::new("Réunion familiale").slots(3).on([Day::SUNDAY]).at("20:00"),
        Occurrence::new("Réunion amis").slots(6).on([Day::FRIDAY]).at("20:00"),
    ];

    for (name, description) in LEGEND {
        plan = plan.legend_item(name, description);
    }

    plan
}
