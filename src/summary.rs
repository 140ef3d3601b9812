//! Derived summary tables
//!
//! Flat, presentation-ready rows built from a finished genealogy. Rows are in
//! natural identifier order. Dates are rendered as `YYYY-MM-DD`, `INVALID` or
//! `NA`; unresolved references render as `NA`.

use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::algorithm::RuleContext;
use crate::algorithm::rules::listing::{recent_death_ids, recent_survivors};
use crate::collections::Genealogy;
use crate::diagnostics::natural_cmp;

const NA: &str = "NA";

fn join_or_na<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items.into_iter().map(|s| s.as_ref().to_string()).join(", ");
    if joined.is_empty() { NA.to_string() } else { joined }
}

/// One row of the individuals table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndividualRow {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub birthday: String,
    pub age: Option<i32>,
    pub alive: bool,
    pub death: String,
    pub child: String,
    pub spouse: String,
}

impl IndividualRow {
    pub const HEADERS: [&'static str; 9] = [
        "ID", "Name", "Gender", "Birthday", "Age", "Alive", "Death", "Child", "Spouse",
    ];

    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.gender.clone(),
            self.birthday.clone(),
            self.age.map_or_else(|| NA.to_string(), |age| age.to_string()),
            self.alive.to_string(),
            self.death.clone(),
            self.child.clone(),
            self.spouse.clone(),
        ]
    }
}

/// One row of the families table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyRow {
    pub id: String,
    pub married: String,
    pub divorced: String,
    pub husband_id: String,
    pub husband_name: String,
    pub wife_id: String,
    pub wife_name: String,
    pub children: Vec<String>,
}

impl FamilyRow {
    pub const HEADERS: [&'static str; 8] = [
        "ID",
        "Married",
        "Divorced",
        "Husband ID",
        "Husband Name",
        "Wife ID",
        "Wife Name",
        "Children",
    ];

    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.married.clone(),
            self.divorced.clone(),
            self.husband_id.clone(),
            self.husband_name.clone(),
            self.wife_id.clone(),
            self.wife_name.clone(),
            join_or_na(&self.children),
        ]
    }
}

/// One row of the recent deaths table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentDeathRow {
    pub id: String,
    pub name: String,
    pub death: String,
}

impl RecentDeathRow {
    pub const HEADERS: [&'static str; 3] = ["ID", "Name", "Death"];

    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), self.death.clone()]
    }
}

/// One row of the recent survivors table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurvivorRow {
    pub death_id: String,
    /// Name of the deceased
    pub survivor_of: String,
    pub surviving_spouses: Vec<String>,
    pub surviving_children: Vec<String>,
}

impl SurvivorRow {
    pub const HEADERS: [&'static str; 4] = [
        "Death ID",
        "Survivor Of",
        "Surviving Spouse",
        "Surviving Children",
    ];

    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.death_id.clone(),
            self.survivor_of.clone(),
            join_or_na(&self.surviving_spouses),
            join_or_na(&self.surviving_children),
        ]
    }
}

/// All summary tables of one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryTables {
    pub individuals: Vec<IndividualRow>,
    pub families: Vec<FamilyRow>,
    pub recent_deaths: Vec<RecentDeathRow>,
    pub recent_survivors: Vec<SurvivorRow>,
}

impl SummaryTables {
    /// Build every table against `today`
    #[must_use]
    pub fn build(genealogy: &Genealogy, today: NaiveDate) -> Self {
        let context = RuleContext::new(genealogy, today);
        let recent = recent_death_ids(&context);

        Self {
            individuals: individual_rows(genealogy),
            families: family_rows(genealogy),
            recent_deaths: recent
                .iter()
                .filter_map(|id| genealogy.individual(id))
                .map(|individual| RecentDeathRow {
                    id: individual.id.clone(),
                    name: individual.display_name().to_string(),
                    death: individual.death.to_string(),
                })
                .collect(),
            recent_survivors: recent_survivors(&context, &recent)
                .into_iter()
                .map(|survivors| SurvivorRow {
                    survivor_of: genealogy.name_of(Some(&survivors.deceased)).to_string(),
                    death_id: survivors.deceased,
                    surviving_spouses: survivors.spouses,
                    surviving_children: survivors.children,
                })
                .collect(),
        }
    }
}

fn individual_rows(genealogy: &Genealogy) -> Vec<IndividualRow> {
    genealogy
        .individuals
        .iter()
        .sorted_by(|a, b| natural_cmp(&a.id, &b.id))
        .map(|individual| IndividualRow {
            id: individual.id.clone(),
            name: individual.display_name().to_string(),
            gender: individual.sex.to_string(),
            birthday: individual.birth.to_string(),
            age: individual.age,
            alive: individual.alive,
            death: individual.death.to_string(),
            child: individual.child_of.clone().unwrap_or_else(|| NA.to_string()),
            spouse: join_or_na(&individual.spouse_of),
        })
        .collect()
}

fn family_rows(genealogy: &Genealogy) -> Vec<FamilyRow> {
    genealogy
        .families
        .iter()
        .sorted_by(|a, b| natural_cmp(&a.id, &b.id))
        .map(|family| FamilyRow {
            id: family.id.clone(),
            married: family.marriage.to_string(),
            divorced: family.divorce.to_string(),
            husband_id: family.husband.clone().unwrap_or_else(|| NA.to_string()),
            husband_name: genealogy.name_of(family.husband.as_deref()).to_string(),
            wife_id: family.wife.clone().unwrap_or_else(|| NA.to_string()),
            wife_name: genealogy.name_of(family.wife.as_deref()).to_string(),
            children: family
                .children
                .iter()
                .cloned()
                .sorted_by(|a, b| natural_cmp(a, b))
                .collect(),
        })
        .collect()
}
