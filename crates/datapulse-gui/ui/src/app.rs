use std::rc::Rc;

use chrono::{
  Local,
  Utc
};
use datapulse_core::format::copyright_line;
use datapulse_core::ops::{
  add_task,
  delete_task,
  load_tasks,
  refresh_task,
  update_task
};
use datapulse_core::theme::{
  ThemeTracker,
  load_theme
};
use datapulse_core::{
  Board,
  BoardAction,
  DashboardError,
  MainContent,
  TaskId
};
use datapulse_gui_shared::TaskFields;
use yew::{
  Callback,
  Html,
  Reducible,
  UseReducerDispatcher,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_reducer
};

use crate::api::{
  BrowserPacer,
  TauriTaskStore,
  store_status,
  ui_log
};
use crate::components::{
  AppHeader,
  LoadingPanel,
  ManagementPage,
  NotConfigured,
  StatusGrid
};
use crate::storage::{
  LocalSettings,
  apply_theme_class,
  prefers_dark
};

#[derive(Debug, Clone, PartialEq)]
struct BoardState(Board);

impl Reducible for BoardState {
  type Action = BoardAction;

  fn reduce(
    self: Rc<Self>,
    action: BoardAction
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    next.0.apply(action);
    Rc::new(next)
  }
}

fn dispatch_fn(
  dispatcher: UseReducerDispatcher<
    BoardState
  >
) -> impl Fn(BoardAction) {
  move |action: BoardAction| {
    dispatcher.dispatch(action)
  }
}

fn alert_failure(
  action: &str,
  err: &DashboardError
) {
  tracing::error!(
    action,
    error = %err,
    "dashboard mutation failed"
  );
  gloo::dialogs::alert(
    &err.alert_text(action)
  );
}

#[function_component(App)]
pub fn app() -> Html {
  let board = use_reducer(|| {
    BoardState(Board::new(load_theme(
      &LocalSettings,
      prefers_dark()
    )))
  });

  {
    let dispatcher = board.dispatcher();
    use_effect_with((), move |_| {
      ui_log(
        "app.mounted",
        "frontend mounted"
      );
      wasm_bindgen_futures::spawn_local(
        async move {
          let configured =
            match store_status().await {
              | Ok(status) => {
                tracing::info!(
                  configured =
                    status.configured,
                  table = ?status.table,
                  "store status resolved"
                );
                status.configured
              }
              | Err(err) => {
                tracing::error!(
                  error = %err,
                  "store_status failed; \
                   treating store as not \
                   configured"
                );
                false
              }
            };
          let store =
            configured.then_some(TauriTaskStore);
          load_tasks(
            store.as_ref(),
            dispatch_fn(dispatcher)
          )
          .await;
        }
      );
      || ()
    });
  }

  {
    let tracker =
      use_mut_ref(ThemeTracker::default);
    use_effect_with(
      board.0.theme(),
      move |theme| {
        apply_theme_class(*theme);
        let saved = tracker
          .borrow_mut()
          .observe(&LocalSettings, *theme);
        tracing::debug!(
          theme = theme.as_class(),
          saved,
          "applied theme"
        );
        || ()
      }
    );
  }

  let theme = board.0.theme();
  let view = board.0.view();
  let store = board
    .0
    .is_configured()
    .then_some(TauriTaskStore);

  let on_toggle_theme = {
    let dispatcher = board.dispatcher();
    Callback::from(move |_| {
      ui_log(
        "theme.toggle",
        theme.toggled().as_class()
      );
      dispatcher
        .dispatch(BoardAction::ToggleTheme);
    })
  };

  let on_toggle_view = {
    let dispatcher = board.dispatcher();
    Callback::from(move |_| {
      ui_log(
        "view.toggle",
        view.toggle_label()
      );
      dispatcher
        .dispatch(BoardAction::ToggleView);
    })
  };

  let on_refresh = {
    let board = board.clone();
    Callback::from(move |id: TaskId| {
      let Some(task) =
        board.0.task(&id).cloned()
      else {
        tracing::warn!(
          id = %id,
          "refresh requested for an \
           unknown task"
        );
        return;
      };
      ui_log("card.refresh", id.as_str());
      let dispatcher = board.dispatcher();
      wasm_bindgen_futures::spawn_local(
        async move {
          refresh_task(
            &task,
            &BrowserPacer,
            Utc::now,
            dispatch_fn(dispatcher)
          )
          .await;
        }
      );
    })
  };

  let on_add = {
    let dispatcher = board.dispatcher();
    Callback::from(
      move |fields: TaskFields| {
        let dispatcher = dispatcher.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            if let Err(err) = add_task(
              store.as_ref(),
              &fields.title,
              &fields.sql_query,
              dispatch_fn(dispatcher)
            )
            .await
            {
              alert_failure(
                "add the data source",
                &err
              );
            }
          }
        );
      }
    )
  };

  let on_update = {
    let dispatcher = board.dispatcher();
    Callback::from(
      move |(id, fields): (
        TaskId,
        TaskFields
      )| {
        let dispatcher = dispatcher.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            if let Err(err) = update_task(
              store.as_ref(),
              &id,
              &fields.title,
              &fields.sql_query,
              dispatch_fn(dispatcher)
            )
            .await
            {
              alert_failure(
                "save the data source",
                &err
              );
            }
          }
        );
      }
    )
  };

  let on_delete = {
    let dispatcher = board.dispatcher();
    Callback::from(move |id: TaskId| {
      let dispatcher = dispatcher.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          if let Err(err) = delete_task(
            store.as_ref(),
            &id,
            dispatch_fn(dispatcher)
          )
          .await
          {
            alert_failure(
              "delete the data source",
              &err
            );
          }
        }
      );
    })
  };

  let content = match board.0.main_content()
  {
    | MainContent::NotConfigured => {
      html! { <NotConfigured /> }
    }
    | MainContent::Loading => {
      html! { <LoadingPanel /> }
    }
    | MainContent::Dashboard => html! {
        <StatusGrid
            tasks={board.0.tasks().to_vec()}
            refreshing={board.0.refreshing_ids().clone()}
            {on_refresh}
        />
    },
    | MainContent::Management => html! {
        <ManagementPage
            tasks={board.0.tasks().to_vec()}
            {on_add}
            {on_update}
            {on_delete}
        />
    }
  };

  let view_label = board
    .0
    .shows_view_toggle()
    .then(|| view.toggle_label());

  html! {
      <div class="shell">
          <AppHeader
              {view_label}
              theme_label={theme.toggle_label()}
              {on_toggle_view}
              {on_toggle_theme}
          />
          <main>{ content }</main>
          <footer>{ copyright_line(&Local::now()) }</footer>
      </div>
  }
}
