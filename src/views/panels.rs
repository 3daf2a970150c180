use maud::{Markup, html};

use crate::services::form::{FieldInput, FormField};
use crate::services::panels::{
    CellStyle, LOAD_FAILED, ListBody, ListView, NO_RECORDS, PLACEHOLDER_COLSPAN, Tab,
};
use crate::toast::ActiveToast;

use super::{Nav, layout};

const TAB_SELECTED: &str = "w-full text-left px-4 py-2 rounded-md text-sm font-medium bg-indigo-50 text-indigo-700";
const TAB_IDLE: &str = "w-full text-left px-4 py-2 rounded-md text-sm font-medium text-gray-600 hover:bg-gray-100";
const INPUT: &str = "mt-1 block w-full rounded-md border border-gray-300 px-3 py-2 text-sm";

fn cell_class(style: CellStyle) -> &'static str {
    match style {
        CellStyle::Muted => "px-6 py-4 whitespace-nowrap text-sm text-gray-500",
        CellStyle::Strong => "px-6 py-4 whitespace-nowrap text-sm font-medium text-gray-900",
        CellStyle::Mono => "px-6 py-4 whitespace-nowrap text-sm text-gray-500 font-mono",
        CellStyle::Badge => "px-6 py-4 whitespace-nowrap text-sm text-gray-500",
    }
}

fn placeholder_row(text: &str, class: &str) -> Markup {
    html! {
        tr {
            td colspan=(PLACEHOLDER_COLSPAN) class={ "px-6 py-4 text-center text-sm " (class) } { (text) }
        }
    }
}

fn list_table(view: &ListView) -> Markup {
    html! {
        table class="min-w-full divide-y divide-gray-200" {
            thead class="bg-gray-50" {
                tr {
                    @for header in view.headers {
                        th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider" { (header) }
                    }
                }
            }
            tbody id={ "list-" (view.kind.slug()) } class="bg-white divide-y divide-gray-200" {
                @match &view.body {
                    ListBody::Records(rows) => {
                        @for row in rows {
                            tr {
                                @for cell in &row.cells {
                                    td class=(cell_class(cell.style)) {
                                        @if cell.style == CellStyle::Badge {
                                            span class="px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-blue-100 text-blue-800" { (cell.text) }
                                        } @else {
                                            (cell.text)
                                        }
                                    }
                                }
                            }
                        }
                    }
                    ListBody::Empty => { (placeholder_row(NO_RECORDS, "text-gray-500")) }
                    ListBody::Failed => { (placeholder_row(LOAD_FAILED, "text-red-500")) }
                }
            }
        }
    }
}

fn form_input(field: &FormField) -> Markup {
    html! {
        @match &field.input {
            FieldInput::Text { placeholder } => {
                input type="text" name=(field.name) value=(field.value) placeholder=(placeholder)
                    class=(INPUT) required[field.required];
            }
            FieldInput::Number { min } => {
                input type="number" name=(field.name) value=(field.value) min=(min)
                    class=(INPUT) required[field.required];
            }
            FieldInput::Select(dropdown) => {
                select id=(dropdown.id) name=(field.name) class=(INPUT) required[field.required] {
                    @for option in &dropdown.options {
                        option value=(option.value) selected[option.value == field.value] { (option.label) }
                    }
                }
            }
        }
    }
}

fn create_form(view: &ListView, fields: &[FormField]) -> Markup {
    let kind = view.kind;
    html! {
        form id={ "form-" (kind.slug()) } method="post" action={ "/panels/" (kind.slug()) }
            class="bg-white shadow rounded-lg p-6 space-y-4"
        {
            h3 class="text-lg font-medium text-gray-900" { "Add " (kind.singular()) }
            @for field in fields {
                label class="block text-sm font-medium text-gray-700" {
                    (field.label)
                    (form_input(field))
                }
            }
            button type="submit" class="w-full bg-indigo-600 text-white rounded-md px-4 py-2 text-sm font-medium hover:bg-indigo-700" {
                "Add " (kind.singular())
            }
        }
    }
}

/// Data-management page: sidebar, create form and list for one panel.
pub fn panel_page(tabs: &[Tab], view: &ListView, fields: &[FormField], toasts: &[ActiveToast]) -> Markup {
    let content = html! {
        div class="flex gap-6" {
            aside id="sidebar-nav" class="w-56 shrink-0 space-y-1" {
                @for tab in tabs {
                    a id={ "tab-" (tab.kind.slug()) } href=(tab.href)
                        class=(if tab.selected { TAB_SELECTED } else { TAB_IDLE })
                    { (tab.kind.title()) }
                }
            }
            section id={ "sec-" (view.kind.slug()) } class="content-section flex-1 grid grid-cols-3 gap-6" {
                div class="col-span-1" { (create_form(view, fields)) }
                div class="col-span-2 bg-white shadow rounded-lg overflow-hidden" { (list_table(view)) }
            }
        }
    };
    layout(view.kind.title(), Nav::Data, toasts, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ReferenceSnapshot;
    use crate::dropdown::fill_dropdowns;
    use crate::models::{Department, EntityKind};
    use crate::services::form::{FormValues, form_fields};
    use crate::services::panels::{RowTemplate, sidebar};

    fn render(view: &ListView, values: &FormValues) -> String {
        let snapshot = ReferenceSnapshot {
            departments: vec![Department { id: 2, name: "Physics".into() }],
            ..Default::default()
        };
        let fields = form_fields(view.kind, &fill_dropdowns(&snapshot), values);
        panel_page(&sidebar(view.kind), view, &fields, &[]).into_string()
    }

    #[test]
    fn empty_list_renders_placeholder_spanning_six_columns() {
        let view = ListView {
            kind: EntityKind::Departments,
            headers: Department::HEADERS,
            body: ListBody::Empty,
        };
        let html = render(&view, &FormValues::default());
        assert!(html.contains(r#"<td colspan="6" class="px-6 py-4 text-center text-sm text-gray-500">No records found.</td>"#));
    }

    #[test]
    fn failed_list_renders_error_row() {
        let view = ListView {
            kind: EntityKind::Departments,
            headers: Department::HEADERS,
            body: ListBody::Failed,
        };
        assert!(render(&view, &FormValues::default()).contains("Error loading data"));
    }

    #[test]
    fn repopulated_form_keeps_values_and_selection() {
        let view = ListView {
            kind: EntityKind::Courses,
            headers: &["ID", "Name", "Department"],
            body: ListBody::Empty,
        };
        let values = FormValues::from_pairs([("name", "BSc <Hons>"), ("department_id", "2")]);
        let html = render(&view, &values);

        assert!(html.contains(r#"value="BSc &lt;Hons&gt;""#));
        assert!(html.contains(r#"<option value="2" selected>Physics</option>"#));
        assert!(html.contains(r#"<option value="">Select Department</option>"#));
    }

    #[test]
    fn selected_tab_is_highlighted() {
        let view = ListView {
            kind: EntityKind::Departments,
            headers: Department::HEADERS,
            body: ListBody::Empty,
        };
        let html = render(&view, &FormValues::default());
        assert!(html.contains(&format!(
            r#"<a id="tab-departments" href="/panels/departments" class="{}">"#,
            TAB_SELECTED
        )));
        assert!(html.contains(&format!(
            r#"<a id="tab-subjects" href="/panels/subjects" class="{}">"#,
            TAB_IDLE
        )));
    }
}
