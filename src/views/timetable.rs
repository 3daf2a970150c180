use maud::{Markup, html};

use crate::dropdown::SelectOption;
use crate::grid::{DAYS, FilterDimension, GridCell, GridView, SessionCard};
use crate::models::Timetable;
use crate::services::TimetablePage;
use crate::toast::ActiveToast;

use super::{Nav, layout};

pub const EMPTY_SELECTION: &str = "No classes scheduled for this selection.";
pub const CHOOSE_FILTER: &str = "Choose a filter to view the timetable.";
pub const NO_TIMETABLE: &str = "No timetable loaded.";
pub const NO_TIMETABLES: &str = "No timetables generated yet.";

const SELECT: &str = "rounded-md border border-gray-300 px-3 py-2 text-sm";

/// Generate section. Rendered without the data sidebar.
pub fn generate_page(toasts: &[ActiveToast]) -> Markup {
    let content = html! {
        section id="sec-generate" class="max-w-xl mx-auto bg-white shadow rounded-lg p-8 text-center space-y-4" {
            h2 class="text-2xl font-bold text-gray-900" { "Generate Timetable" }
            p class="text-gray-500" {
                "Builds a new weekly timetable from the current departments, faculty, rooms and subjects."
            }
            form method="post" action="/generate" {
                button id="generate-btn" type="submit"
                    class="bg-indigo-600 text-white rounded-md px-6 py-3 font-medium hover:bg-indigo-700"
                {
                    i class="fa-solid fa-wand-magic-sparkles mr-2" {}
                    "Generate"
                }
            }
            a href="/timetable/latest" class="block text-sm text-indigo-600 hover:underline" { "View latest timetable" }
        }
    };
    layout("Generate", Nav::Generate, toasts, content)
}

fn options(list: &[SelectOption], selected: Option<&str>) -> Markup {
    html! {
        @for option in list {
            option value=(option.value) selected[Some(option.value.as_str()) == selected] { (option.label) }
        }
    }
}

fn filter_form(page: &TimetablePage, grid: Option<&GridView>) -> Markup {
    let dimension = grid.map_or(FilterDimension::Semester, |g| g.filter.dimension());
    let entity = grid.map(|g| g.filter.entity_id().to_string());
    html! {
        form id="grid-filter" method="get" action="/timetable" class="flex items-center gap-4" {
            input type="hidden" name="id" value=(page.timetable.id);
            select name="by" class=(SELECT) onchange="this.form.entity.value='';this.form.submit()" {
                @for d in FilterDimension::ALL {
                    option value=(d.as_str()) selected[d == dimension] { (d.label()) }
                }
            }
            select name="entity" class=(SELECT) onchange="this.form.submit()" {
                (options(&page.meta.filter_options(dimension), entity.as_deref()))
            }
        }
    }
}

fn card(card: &SessionCard) -> Markup {
    html! {
        div class="bg-indigo-50 border-l-4 border-indigo-500 rounded p-2 text-left" {
            p class="font-semibold text-indigo-900 text-sm" { (card.subject) }
            @if let Some(faculty) = &card.faculty {
                p class="text-xs text-gray-600" { i class="fa-solid fa-user mr-1" {} (faculty) }
            }
            @if let Some(classroom) = &card.classroom {
                p class="text-xs text-gray-600" { i class="fa-solid fa-door-open mr-1" {} (classroom) }
            }
        }
    }
}

fn grid_table(grid: &GridView) -> Markup {
    html! {
        table id="timetable-grid" class="min-w-full border-collapse bg-white shadow rounded-lg" {
            thead class="bg-gray-50" {
                tr {
                    th class="px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase" { "Time" }
                    @for day in DAYS {
                        th class="px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase" { (day) }
                    }
                }
            }
            tbody {
                @for row in &grid.rows {
                    tr class="border-t border-gray-200" {
                        td class="px-4 py-3 text-sm font-medium text-gray-700 whitespace-nowrap" { (row.label) }
                        @for cell in &row.cells {
                            td class="px-2 py-2 align-top w-1/6" {
                                @match cell {
                                    GridCell::Card(c) => { (card(c)) }
                                    GridCell::Empty => {
                                        span class="text-xs text-gray-300 italic" { "Free Slot" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn notice(id: &str, text: &str) -> Markup {
    html! {
        div id=(id) class="bg-yellow-50 border border-yellow-200 text-yellow-800 rounded-md px-4 py-3 text-sm" { (text) }
    }
}

/// Grid page for one timetable. `grid` is absent when no filter could be chosen.
pub fn timetable_page(page: Option<&TimetablePage>, grid: Option<&GridView>, toasts: &[ActiveToast]) -> Markup {
    let content = html! {
        @match page {
            None => { (notice("no-timetable", NO_TIMETABLE)) }
            Some(page) => {
                div class="flex items-center justify-between mb-6" {
                    div {
                        h2 class="text-2xl font-bold text-gray-900" { "Timetable #" (page.timetable.id) }
                        p id="fitness" class="text-sm text-gray-500" {
                            "Fitness score: " (format!("{:.1}", page.timetable.fitness_score))
                        }
                    }
                    (filter_form(page, grid))
                }
                @match grid {
                    None => { (notice("choose-filter", CHOOSE_FILTER)) }
                    Some(grid) => {
                        @if !grid.found {
                            div class="mb-4" { (notice("empty-selection", EMPTY_SELECTION)) }
                        }
                        (grid_table(grid))
                    }
                }
            }
        }
    };
    layout("Timetable", Nav::Timetables, toasts, content)
}

/// Index of generated timetables.
pub fn timetables_page(timetables: &[Timetable], toasts: &[ActiveToast]) -> Markup {
    let content = html! {
        h2 class="text-2xl font-bold text-gray-900 mb-6" { "Timetables" }
        div class="bg-white shadow rounded-lg overflow-hidden" {
            table class="min-w-full divide-y divide-gray-200" {
                thead class="bg-gray-50" {
                    tr {
                        @for header in ["ID", "Fitness", "Created", "Sessions", ""] {
                            th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider" { (header) }
                        }
                    }
                }
                tbody id="list-timetables" class="divide-y divide-gray-200" {
                    @for tt in timetables {
                        tr {
                            td class="px-6 py-4 text-sm text-gray-500" { (tt.id) }
                            td class="px-6 py-4 text-sm font-medium text-gray-900" { (format!("{:.1}", tt.fitness_score)) }
                            td class="px-6 py-4 text-sm text-gray-500" { (tt.created_at.as_deref().unwrap_or("-")) }
                            td class="px-6 py-4 text-sm text-gray-500" { (tt.sessions.len()) }
                            td class="px-6 py-4 text-sm" {
                                a href={ "/timetable?id=" (tt.id) } class="text-indigo-600 hover:underline" { "View" }
                            }
                        }
                    }
                    @if timetables.is_empty() {
                        tr {
                            td colspan="5" class="px-6 py-4 text-center text-sm text-gray-500" { (NO_TIMETABLES) }
                        }
                    }
                }
            }
        }
    };
    layout("Timetables", Nav::Timetables, toasts, content)
}
