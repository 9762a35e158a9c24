table! {
    contacts (id) {
        id -> Text,
        first -> Nullable<Text>,
        last -> Nullable<Text>,
        twitter -> Nullable<Text>,
        avatar -> Nullable<Text>,
        notes -> Nullable<Text>,
        favorite -> Bool,
        created_at -> Timestamp,
    }
}
