//! Markup for movement pages and the fragments htmx swaps into them.

use maud::{Markup, html};
use rust_decimal::Decimal;
use time::Date;

use crate::{
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_ERROR_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
        format_currency, format_date, loading_spinner,
    },
    movement::{ALL_MOVEMENT_TYPES, Movement, MovementId, MovementType},
};

/// The element IDs that fragments are swapped into.
pub const MOVEMENT_LIST_ID: &str = "movement-list";
pub const MOVEMENT_CARDS_ID: &str = "movement-cards";
pub const FILTER_FORM_ID: &str = "movement-filter";

/// Triggered by responses that add, change or remove a movement so the list
/// and balance are reloaded with the current filter.
pub const MOVEMENTS_CHANGED_EVENT: &str = "movements-changed";

pub fn movement_element_id(id: MovementId) -> String {
    format!("movement-{id}")
}

/// The values shown in the filter form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterFormValues {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub description: String,
    pub movement_type: String,
}

/// The home page: filter form, movement list and a button for new movements.
pub fn home_view(filter: &FilterFormValues, movements: &[Movement], balance: Decimal) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-3xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Movements" }

                    button
                        type="button"
                        hx-get=(endpoints::CREATE_MOVEMENT_FORM)
                        hx-target="#modal"
                        hx-swap="innerHTML"
                        class=(LINK_STYLE)
                    {
                        "New movement"
                    }
                }

                (filter_form(filter))
                (movement_list(movements, balance))
            }
        }
    };

    base("Home", &content)
}

/// The filter form, submitting to the filter endpoint and replacing the movement list.
pub fn filter_form(values: &FilterFormValues) -> Markup {
    let (incomes, expenses) = (MovementType::Incomes, MovementType::Expenses);
    let type_options = [
        (ALL_MOVEMENT_TYPES, "All"),
        (incomes.as_str(), "Incomes"),
        (expenses.as_str(), "Expenses"),
    ];
    let selected_type = if values.movement_type.is_empty() {
        ALL_MOVEMENT_TYPES
    } else {
        values.movement_type.as_str()
    };

    html! {
        form
            id=(FILTER_FORM_ID)
            hx-get=(endpoints::FILTER_MOVEMENTS)
            hx-target={ "#" (MOVEMENT_LIST_ID) }
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="grid grid-cols-1 gap-4 sm:grid-cols-2"
        {
            div
            {
                label for="start_date" class=(FORM_LABEL_STYLE) { "From" }
                input
                    id="start_date"
                    name="start_date"
                    type="date"
                    value=[values.start_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="end_date" class=(FORM_LABEL_STYLE) { "To" }
                input
                    id="end_date"
                    name="end_date"
                    type="date"
                    value=[values.end_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter_description" class=(FORM_LABEL_STYLE) { "Description" }
                input
                    id="filter_description"
                    name="description"
                    type="search"
                    placeholder="Search descriptions"
                    value=(values.description)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter_movement_type" class=(FORM_LABEL_STYLE) { "Type" }
                select
                    id="filter_movement_type"
                    name="movement_type"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (value, label) in type_options {
                        option value=(value) selected[value == selected_type] { (label) }
                    }
                }
            }

            div class="flex gap-4 sm:col-span-2"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Filter" }

                button
                    type="button"
                    hx-get=(endpoints::EMPTY_FILTER)
                    hx-target={ "#" (FILTER_FORM_ID) }
                    hx-swap="outerHTML"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Clear"
                }
            }
        }
    }
}

/// The balance followed by a card for each movement.
pub fn movement_list(movements: &[Movement], balance: Decimal) -> Markup {
    html! {
        section
            id=(MOVEMENT_LIST_ID)
            hx-get=(endpoints::FILTER_MOVEMENTS)
            hx-trigger={ (MOVEMENTS_CHANGED_EVENT) " from:body" }
            hx-include={ "#" (FILTER_FORM_ID) }
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="space-y-4"
        {
            (balance_view(balance))

            div id=(MOVEMENT_CARDS_ID) class="space-y-4"
            {
                // Only shown while there are no cards next to it.
                p class="hidden only:block text-center text-gray-500 dark:text-gray-400"
                {
                    "No movements found."
                }

                @for movement in movements {
                    (movement_card(movement))
                }
            }
        }
    }
}

pub fn balance_view(balance: Decimal) -> Markup {
    let style = if balance < Decimal::ZERO {
        "text-2xl font-bold text-red-600 dark:text-red-400"
    } else {
        "text-2xl font-bold text-green-600 dark:text-green-400"
    };

    html! {
        div id="balance" class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm dark:border-gray-700 dark:bg-gray-800"
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { "Balance" }
            p class=(style) { (format_currency(balance)) }
        }
    }
}

/// A single movement with edit and delete actions.
pub fn movement_card(movement: &Movement) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_MOVEMENT_FORM, movement.id);
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_MOVEMENT, movement.id);
    let confirm_message = format!(
        "Are you sure you want to delete '{}'? This cannot be undone.",
        movement.description
    );
    let amount_style = match movement.movement_type {
        MovementType::Incomes => "tabular-nums font-semibold text-green-600 dark:text-green-400",
        MovementType::Expenses => "tabular-nums font-semibold text-red-600 dark:text-red-400",
        MovementType::Other(_) => "tabular-nums font-semibold text-gray-900 dark:text-white",
    };

    html! {
        article
            id=(movement_element_id(movement.id))
            class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm dark:border-gray-700 dark:bg-gray-800"
        {
            div class="flex items-start justify-between gap-3"
            {
                div
                {
                    h2 class="font-medium" { (movement.description) }
                    time
                        datetime=(movement.movement_date)
                        class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        (format_date(movement.movement_date))
                    }
                }

                div class="text-right"
                {
                    p class=(amount_style) { (format_currency(movement.amount.as_decimal())) }
                    p class="text-xs uppercase text-gray-500 dark:text-gray-400"
                    {
                        (movement.movement_type)
                    }
                }
            }

            div class="mt-2 flex items-center gap-4 text-sm"
            {
                button
                    type="button"
                    hx-get=(edit_url)
                    hx-target="#modal"
                    hx-swap="innerHTML"
                    class=(LINK_STYLE)
                {
                    "Edit"
                }

                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-confirm=(confirm_message)
                    hx-target="closest article"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

/// Raw field values shown in the create and edit forms.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MovementFormValues {
    pub description: String,
    pub amount: String,
    pub movement_type: String,
    pub movement_date: String,
}

impl From<&Movement> for MovementFormValues {
    fn from(movement: &Movement) -> Self {
        Self {
            description: movement.description.clone(),
            amount: movement.amount.as_decimal().to_string(),
            movement_type: movement.movement_type.as_str().to_owned(),
            movement_date: movement.movement_date.to_string(),
        }
    }
}

/// Whether a movement form creates a new movement or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementFormMode {
    Create,
    Edit(MovementId),
}

/// The create or edit form, shown as a modal over the page.
pub fn movement_form_modal(
    mode: MovementFormMode,
    values: &MovementFormValues,
    max_date: Date,
) -> Markup {
    let (title, submit_text, post_url, put_url, target, swap) = match mode {
        MovementFormMode::Create => (
            "New movement",
            "Create",
            Some(endpoints::SUBMIT_MOVEMENT.to_owned()),
            None,
            format!("#{MOVEMENT_CARDS_ID}"),
            "beforeend",
        ),
        MovementFormMode::Edit(id) => (
            "Edit movement",
            "Save",
            None,
            Some(endpoints::format_endpoint(endpoints::UPDATE_MOVEMENT, id)),
            format!("#{}", movement_element_id(id)),
            "outerHTML",
        ),
    };

    html! {
        div
            class="fixed inset-0 z-40 flex items-center justify-center bg-gray-900/50 px-4"
        {
            div class="w-full max-w-md rounded-lg bg-white p-6 shadow dark:bg-gray-800 dark:text-white"
            {
                h2 class="mb-4 text-xl font-bold" { (title) }

                form
                    hx-post=[post_url]
                    hx-put=[put_url]
                    hx-target=(target)
                    hx-swap=(swap)
                    hx-target-error="#alert-container"
                    hx-indicator="#indicator"
                    data-modal-form
                    class="space-y-4"
                {
                    (description_field(&values.description, None))
                    (amount_field(&values.amount, None))
                    (movement_type_field(&values.movement_type))
                    (movement_date_field(&values.movement_date, None, max_date))

                    div class="flex gap-4"
                    {
                        button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
                        {
                            span class="htmx-indicator" { (loading_spinner()) }
                            (submit_text)
                        }

                        button
                            type="button"
                            onclick="document.getElementById('modal').innerHTML = ''"
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}

/// The description input, validated on change.
pub fn description_field(value: &str, error: Option<&str>) -> Markup {
    html! {
        div id="description-field" hx-target="this" hx-swap="outerHTML"
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }
            input
                id="description"
                name="description"
                type="text"
                placeholder="What was it for?"
                value=(value)
                required
                hx-post=(endpoints::VALIDATE_DESCRIPTION)
                hx-trigger="change"
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(error))
        }
    }
}

/// The amount input, validated on change.
pub fn amount_field(value: &str, error: Option<&str>) -> Markup {
    html! {
        div id="amount-field" hx-target="this" hx-swap="outerHTML"
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
            input
                id="amount"
                name="amount"
                type="number"
                step="any"
                min="0"
                max="45000"
                placeholder="0.00"
                value=(value)
                required
                hx-post=(endpoints::VALIDATE_AMOUNT)
                hx-trigger="change"
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(error))
        }
    }
}

/// The movement date input, validated on change.
pub fn movement_date_field(value: &str, error: Option<&str>, max_date: Date) -> Markup {
    html! {
        div id="movement-date-field" hx-target="this" hx-swap="outerHTML"
        {
            label for="movement_date" class=(FORM_LABEL_STYLE) { "Date" }
            input
                id="movement_date"
                name="movement_date"
                type="date"
                max=(max_date)
                value=(value)
                required
                hx-post=(endpoints::VALIDATE_MOVEMENT_DATE)
                hx-trigger="change"
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(error))
        }
    }
}

/// The type radios. A stored type other than incomes or expenses gets its own
/// checked radio so saving the form unchanged keeps it.
fn movement_type_field(selected: &str) -> Markup {
    let (incomes, expenses) = (MovementType::Incomes, MovementType::Expenses);
    let other = match MovementType::from(selected) {
        MovementType::Other(other) if !other.is_empty() => Some(other),
        _ => None,
    };
    let is_income = selected == incomes.as_str();
    let is_expense = !is_income && other.is_none();

    html! {
        fieldset class="flex gap-6"
        {
            legend class=(FORM_LABEL_STYLE) { "Type" }

            label class="flex items-center gap-2"
            {
                input
                    type="radio"
                    name="movement_type"
                    value=(expenses.as_str())
                    checked[is_expense]
                    required;
                "Expense"
            }

            label class="flex items-center gap-2"
            {
                input
                    type="radio"
                    name="movement_type"
                    value=(incomes.as_str())
                    checked[is_income]
                    required;
                "Income"
            }

            @if let Some(other) = other {
                label class="flex items-center gap-2"
                {
                    input
                        type="radio"
                        name="movement_type"
                        value=(other)
                        checked
                        required;
                    (other)
                }
            }
        }
    }
}

fn field_error(error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = error {
            p class=(FORM_ERROR_STYLE) { (error) }
        }
    }
}
