diesel::table! {
    clients (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        phone -> Text,
        address -> Text,
    }
}

diesel::table! {
    administrators (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        phone -> Text,
    }
}

diesel::table! {
    slots (id) {
        id -> Uuid,
        date -> Date,
        start_time -> Time,
        end_time -> Time,
        zone -> Text,
        service_type -> Text,
        free -> Bool,
    }
}

diesel::table! {
    appointments (id) {
        id -> Uuid,
        date -> Date,
        time -> Time,
        duration_minutes -> Int4,
        service_type -> Text,
        status -> Text,
        notes -> Text,
        client_id -> Uuid,
        slot_id -> Uuid,
        admin_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    notifications (id) {
        id -> Uuid,
        message -> Text,
        kind -> Text,
        appointment_id -> Uuid,
        sent -> Bool,
        sent_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(appointments -> clients (client_id));
diesel::joinable!(appointments -> slots (slot_id));
diesel::joinable!(notifications -> appointments (appointment_id));

diesel::allow_tables_to_appear_in_same_query!(
    clients,
    administrators,
    slots,
    appointments,
    notifications,
);
