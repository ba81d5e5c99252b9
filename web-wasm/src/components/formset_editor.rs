//! formset 編集（行の追加・削除と「全行に入力」）

use assets_console_common::fill::fill_column_from_row_with_limit;
use assets_console_common::guard::InputKind;
use assets_console_common::{FieldLink, FillToolbar, FormCollection, FormField, FormRow, UnsavedChangesGuard};
use gloo::console;
use leptos::prelude::*;

/// 入力値を反映して連動フィールドを合わせる
fn apply_input(collection: &mut FormCollection, row: usize, key: &str, value: &str, links: &[FieldLink]) {
    if collection.input(row, key, value) {
        collection.react_to_change(row, key, links);
    }
}

#[component]
pub fn FormsetEditor(
    collection: RwSignal<FormCollection>,
    guard: RwSignal<UnsavedChangesGuard>,
    max_fill_rows: usize,
) -> impl IntoView {
    let toolbar = RwSignal::new(FillToolbar::new());
    let links = StoredValue::new(vec![FieldLink::user_sets_in_progress()]);

    let on_add = move |_| {
        let added = collection.try_update(|c| c.add_row()).unwrap_or(false);
        if added {
            guard.update(|g| g.input_changed(InputKind::Visible));
        } else {
            console::log!("最終行が未入力のため行を追加しません");
        }
    };

    let on_delete = move |index: usize| {
        if collection.try_update(|c| c.delete_row(index)).unwrap_or(false) {
            guard.update(|g| g.input_changed(InputKind::Visible));
        }
    };

    let on_fill = move |_| {
        let Some(source) = toolbar.with_untracked(|t| t.target().cloned()) else {
            return;
        };
        toolbar.update(|t| t.blur());
        let result = collection.try_update(|c| {
            let outcome = fill_column_from_row_with_limit(c, &source, max_fill_rows)?;
            links.with_value(|links| {
                for notification in &outcome.notifications {
                    c.react_to_change(notification.row, &notification.field, links);
                }
            });
            Ok::<_, assets_console_common::Error>(outcome)
        });
        match result {
            Some(Ok(outcome)) => {
                guard.update(|g| g.input_changed(InputKind::Visible));
                console::log!(format!("{}行に入力しました", outcome.updated_rows.len()));
            }
            Some(Err(e)) if e.is_configuration_defect() => console::error!(format!("設定不備: {}", e)),
            Some(Err(e)) => console::warn!(e.to_string()),
            None => {}
        }
    };

    let rows = move || {
        collection.with(|c| {
            c.rows()
                .iter()
                .cloned()
                .map(|row| view! { <FormRowView row=row collection=collection guard=guard toolbar=toolbar links=links on_delete=on_delete /> })
                .collect_view()
        })
    };

    let management = move || {
        collection.with(|c| {
            c.management_form()
                .into_iter()
                .map(|(name, value)| view! { <input type="hidden" name=name.clone() id=format!("id_{}", name) value=value /> })
                .collect_view()
        })
    };

    view! {
        <form
            class="formset detect-changes"
            method="post"
            on:submit=move |_| guard.update(|g| g.submitted())
        >
            <div class="management-form">{management}</div>
            <div class="formset-rows">{rows}</div>

            <Show when=move || toolbar.with(|t| t.is_visible())>
                <div class="fill-toolbar">
                    <button type="button" class="btn btn-small btn-secondary" on:click=on_fill>
                        "全行に入力"
                    </button>
                </div>
            </Show>

            <div class="formset-actions">
                <button type="button" class="btn btn-small btn-secondary" on:click=on_add>
                    "行を追加"
                </button>
                <button type="submit" class="btn btn-primary">"保存"</button>
            </div>
        </form>
    }
}

#[component]
fn FormRowView<FD>(
    row: FormRow,
    collection: RwSignal<FormCollection>,
    guard: RwSignal<UnsavedChangesGuard>,
    toolbar: RwSignal<FillToolbar>,
    links: StoredValue<Vec<FieldLink>>,
    on_delete: FD,
) -> impl IntoView
where
    FD: Fn(usize) + 'static + Copy + Send,
{
    let index = row.index;
    let fields = row
        .fields
        .into_iter()
        .map(|field| view! { <FieldView index=index field=field collection=collection guard=guard toolbar=toolbar links=links /> })
        .collect_view();

    view! {
        <div class="formset-row" class:initial=row.is_initial>
            <span class="ordinal">{row.ordinal}</span>
            {fields}
            <button type="button" class="btn btn-small btn-tertiary" on:click=move |_| on_delete(index)>
                "削除"
            </button>
        </div>
    }
}

#[component]
fn FieldView(
    index: usize,
    field: FormField,
    collection: RwSignal<FormCollection>,
    guard: RwSignal<UnsavedChangesGuard>,
    toolbar: RwSignal<FillToolbar>,
    links: StoredValue<Vec<FieldLink>>,
) -> impl IntoView {
    let key = field.key.clone();
    let hidden = field.hidden().cloned();
    let messages = field.messages.clone();
    let focused = field.clone();

    view! {
        <div class="form-group" class:has-error=field.has_error>
            <input
                type="text"
                name=field.name.clone()
                id=field.id.clone()
                prop:value=field.value.clone()
                on:focus=move |_| toolbar.update(|t| t.focus(&focused))
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    collection.update(|c| links.with_value(|l| apply_input(c, index, &key, &value, l)));
                    guard.update(|g| g.input_changed(InputKind::Visible));
                }
            />
            {hidden.map(|h| view! { <input type="hidden" name=h.name id=h.id value=h.value /> })}
            {messages.into_iter().map(|m| view! { <span class="help-inline">{m}</span> }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assets_console_common::RowTemplate;

    #[test]
    fn test_apply_input_sets_hidden_and_links() {
        let t = RowTemplate::new("form").with_fields(["user", "status"]);
        let mut row = FormRow::blank(&t, 0);
        row.fields[0] = FormField::blank(&t, 0, "user").autocompleted();
        let mut c = FormCollection::from_rows(t, vec![row]);

        apply_input(&mut c, 0, "user", "42", &[FieldLink::user_sets_in_progress()]);

        let row = c.row(0).unwrap();
        assert_eq!(row.field("user").unwrap().submitted_value(), "42");
        assert_eq!(row.field("status").unwrap().value, "in progress");
    }

    #[test]
    fn test_apply_input_unknown_field_is_ignored() {
        let t = RowTemplate::new("form").with_fields(["sn"]);
        let mut c = FormCollection::with_blank_rows(t, 0, 1);
        let before = c.clone();
        apply_input(&mut c, 0, "missing", "x", &[]);
        apply_input(&mut c, 3, "sn", "x", &[]);
        assert_eq!(c, before);
    }
}
